//! Particle dataset store.
//!
//! This module provides functionality for:
//! - The ordered set of simulation timesteps and slider resolution
//! - Parsing per-timestep particle CSV exports
//! - Loading datasets asynchronously from the update loop
//! - Post-load repaint bursts

mod dataset;
mod load_channel;
mod render_burst;
mod timestep;

pub use dataset::ParticleDataset;
pub use load_channel::{DatasetLoadChannel, DatasetLoadResult};
pub use render_burst::{RenderBurst, DEFAULT_BURST_INTERVAL, DEFAULT_BURST_PASSES};
pub use timestep::{Timeline, Timestep, DEFAULT_STEPS, RESOLUTION_STEP};
