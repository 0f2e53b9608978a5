//! Discrete simulation timesteps and slider resolution.
//!
//! Timesteps are stored as whole hundredths so that identity is exact and
//! the two-decimal label (`0.05`, `0.11`, ...) round-trips without float
//! comparison.

use std::fmt;

/// Granularity of the slider and of timestep labels.
pub const RESOLUTION_STEP: f64 = 0.01;

/// Default set of simulation timesteps with exported particle data.
pub const DEFAULT_STEPS: &[f64] = &[0.05, 0.06, 0.08, 0.09, 0.11, 0.12, 0.13];

/// One discrete point in the simulation's time domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestep {
    hundredths: u32,
}

impl Timestep {
    /// Creates a timestep from a value, rounded to two decimals.
    ///
    /// Returns `None` for negative or non-finite values.
    pub fn from_value(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Some(Self {
            hundredths: (value * 100.0).round() as u32,
        })
    }

    pub fn value(&self) -> f64 {
        self.hundredths as f64 / 100.0
    }

    /// Two-decimal label, also used as the dataset resource name.
    pub fn label(&self) -> String {
        format!("{:.2}", self.value())
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// The ordered, non-empty set of valid timesteps.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    steps: Vec<Timestep>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::from_values(DEFAULT_STEPS).unwrap_or_else(|| Self {
            steps: vec![Timestep { hundredths: 5 }],
        })
    }
}

impl Timeline {
    /// Builds a timeline from raw values, sorting and de-duplicating them.
    ///
    /// Returns `None` if no valid value remains.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut steps: Vec<Timestep> = values
            .iter()
            .filter_map(|&v| Timestep::from_value(v))
            .collect();
        steps.sort();
        steps.dedup();

        if steps.is_empty() {
            None
        } else {
            Some(Self { steps })
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[Timestep] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<Timestep> {
        self.steps.get(index).copied()
    }

    pub fn first(&self) -> Timestep {
        self.steps[0]
    }

    pub fn min_value(&self) -> f64 {
        self.steps[0].value()
    }

    pub fn max_value(&self) -> f64 {
        self.steps[self.steps.len() - 1].value()
    }

    pub fn contains(&self, step: Timestep) -> bool {
        self.steps.binary_search(&step).is_ok()
    }

    pub fn index_of(&self, step: Timestep) -> Option<usize> {
        self.steps.binary_search(&step).ok()
    }

    /// Snaps a continuous slider value to a valid timestep.
    ///
    /// The value is rounded to whole hundredths once and the
    /// first member at or above it wins. This is a forward search, not a
    /// nearest-neighbour one: `0.10` resolves to `0.11` even though `0.09`
    /// is equally close. Values past the last member resolve to nothing.
    pub fn resolve(&self, value: f64) -> Option<Timestep> {
        if !value.is_finite() {
            return None;
        }

        let hundredths = (value * 100.0).round();
        let index = self.steps.partition_point(|step| (step.hundredths as f64) < hundredths);
        self.steps.get(index).copied()
    }
}
