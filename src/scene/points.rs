//! Particle point cloud.

use super::lighting::hsl_to_rgb;
use crate::particles::{ParticleDataset, Timestep};
use glam::Vec3;

/// Default particle size in world units.
pub const DEFAULT_POINT_SIZE: f32 = 0.2;

/// Particle colour, `hsl(50, 65%, 75%)`.
pub fn particle_color() -> Vec3 {
    hsl_to_rgb(50.0, 0.65, 0.75)
}

/// The displayed particles of one timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub step: Timestep,
    pub positions: Vec<Vec3>,
    /// World-space size, attenuated with distance when painted
    pub size: f32,
    pub color: Vec3,
}

impl PointCloud {
    pub fn from_dataset(dataset: ParticleDataset, size: f32) -> Self {
        Self {
            step: dataset.step,
            positions: dataset.points,
            size,
            color: particle_color(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dataset_keeps_points_and_step() {
        let dataset = ParticleDataset {
            step: Timestep::from_value(0.09).unwrap(),
            points: vec![Vec3::ZERO, Vec3::ONE],
        };

        let cloud = PointCloud::from_dataset(dataset, DEFAULT_POINT_SIZE);

        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.step.label(), "0.09");
        assert_eq!(cloud.size, 0.2);
        assert_eq!(cloud.color, particle_color());
    }
}
