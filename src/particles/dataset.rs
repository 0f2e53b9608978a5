//! Particle position datasets exported per simulation timestep.

use super::Timestep;
use crate::assets::LoadError;
use glam::Vec3;

/// CSV columns holding the particle coordinates.
pub const COLUMN_X: &str = "Points:0";
pub const COLUMN_Y: &str = "Points:1";
pub const COLUMN_Z: &str = "Points:2";

/// Particle positions for exactly one timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleDataset {
    pub step: Timestep,
    pub points: Vec<Vec3>,
}

impl ParticleDataset {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Parses a particle CSV export.
///
/// Only the three coordinate columns are read; any other columns in the
/// export are ignored. Rows with unparseable coordinates are skipped.
pub fn parse_particle_csv(step: Timestep, bytes: &[u8]) -> Result<ParticleDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Csv(e.to_string()))?
        .clone();

    let column = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let x_idx = column(COLUMN_X)?;
    let y_idx = column(COLUMN_Y)?;
    let z_idx = column(COLUMN_Z)?;

    let mut points = Vec::new();
    let mut skipped = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Csv(e.to_string()))?;
        let coord = |idx: usize| record.get(idx).and_then(|v| v.parse::<f32>().ok());

        match (coord(x_idx), coord(y_idx), coord(z_idx)) {
            (Some(x), Some(y), Some(z)) if x.is_finite() && y.is_finite() && z.is_finite() => {
                points.push(Vec3::new(x, y, z));
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!(
            "Skipped {} particle row(s) with invalid coordinates at step {}",
            skipped,
            step
        );
    }

    Ok(ParticleDataset { step, points })
}
