//! 3D scene: orbit camera, studio lights, nozzle model and particle cloud.

mod camera;
mod lighting;
mod model;
mod points;
mod viewport;

pub use model::{ModelLoadChannel, ModelLoadResult};
pub use points::{PointCloud, DEFAULT_POINT_SIZE};
pub use viewport::Viewport;
