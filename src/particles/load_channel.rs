//! Async particle dataset loading.
//!
//! Uses channel-based communication to bridge async fetches with egui's
//! synchronous update loop. Every request is tagged with a generation
//! number; results from superseded requests are discarded on receipt so a
//! slow fetch for an old step never replaces a newer one.

use super::dataset::{parse_particle_csv, ParticleDataset};
use super::{Timeline, Timestep};
use crate::assets::{fetch_bytes, AssetPaths};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Result of a dataset load.
#[derive(Debug, Clone)]
pub enum DatasetLoadResult {
    /// Dataset fetched and parsed
    Success {
        dataset: ParticleDataset,
        fetch_latency_ms: f64,
    },
    /// Fetch or parse failed
    Error { step: Timestep, message: String },
}

impl DatasetLoadResult {
    pub fn step(&self) -> Timestep {
        match self {
            DatasetLoadResult::Success { dataset, .. } => dataset.step,
            DatasetLoadResult::Error { step, .. } => *step,
        }
    }
}

/// Channel for loading particle datasets on demand.
pub struct DatasetLoadChannel {
    sender: Sender<(u64, DatasetLoadResult)>,
    receiver: Receiver<(u64, DatasetLoadResult)>,
    /// Generation of the most recently issued request
    generation: u64,
    /// Step of the most recent request that has not completed yet
    pending: Option<Timestep>,
}

impl Default for DatasetLoadChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoadChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            generation: 0,
            pending: None,
        }
    }

    /// Step currently being loaded, if any.
    pub fn pending_step(&self) -> Option<Timestep> {
        self.pending
    }

    /// Starts loading the dataset for `step`.
    ///
    /// Steps outside the timeline are ignored and `false` is returned.
    pub fn load(
        &mut self,
        ctx: egui::Context,
        paths: &AssetPaths,
        timeline: &Timeline,
        step: Timestep,
    ) -> bool {
        if !timeline.contains(step) {
            log::debug!("Ignoring load for unknown timestep {}", step);
            return false;
        }

        self.generation += 1;
        self.pending = Some(step);

        let generation = self.generation;
        let path = paths.dataset_path(step);
        let sender = self.sender.clone();
        log::debug!("Loading particles for {} from {}", step, path);

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || {
                let result = pollster::block_on(load_dataset(path, step));
                let _ = sender.send((generation, result));
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = load_dataset(path, step).await;
                let _ = sender.send((generation, result));
                ctx.request_repaint();
            });
        }

        true
    }

    /// Non-blocking receive of the latest completed load.
    ///
    /// Results belonging to older requests are dropped.
    pub fn try_recv(&mut self) -> Option<DatasetLoadResult> {
        while let Ok((generation, result)) = self.receiver.try_recv() {
            if generation < self.generation {
                log::debug!("Dropping superseded load for {}", result.step());
                continue;
            }
            self.pending = None;
            return Some(result);
        }
        None
    }
}

async fn load_dataset(path: String, step: Timestep) -> DatasetLoadResult {
    let started = web_time::Instant::now();

    let outcome = match fetch_bytes(&path).await {
        Ok(bytes) => parse_particle_csv(step, &bytes),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(dataset) => {
            let fetch_latency_ms = started.elapsed().as_secs_f64() * 1000.0;
            log::info!(
                "Loaded {} particles for {} in {:.0}ms",
                dataset.len(),
                step,
                fetch_latency_ms
            );
            DatasetLoadResult::Success {
                dataset,
                fetch_latency_ms,
            }
        }
        Err(e) => {
            log::error!("Failed to load {}: {}", path, e);
            DatasetLoadResult::Error {
                step,
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(value: f64) -> ParticleDataset {
        ParticleDataset {
            step: Timestep::from_value(value).unwrap(),
            points: Vec::new(),
        }
    }

    #[test]
    fn test_unknown_step_is_not_loaded() {
        let mut channel = DatasetLoadChannel::new();
        let timeline = Timeline::default();
        let ctx = egui::Context::default();

        let issued = channel.load(
            ctx,
            &AssetPaths::default(),
            &timeline,
            Timestep::from_value(0.07).unwrap(),
        );

        assert!(!issued);
        assert_eq!(channel.pending_step(), None);
        assert_eq!(channel.generation, 0);
    }

    #[test]
    fn test_superseded_results_are_dropped() {
        let mut channel = DatasetLoadChannel::new();
        channel.generation = 2;
        channel.pending = Some(Timestep::from_value(0.06).unwrap());

        // The older request finishes last-but-one, the newer one after it.
        let stale = DatasetLoadResult::Success {
            dataset: dataset(0.05),
            fetch_latency_ms: 1.0,
        };
        let fresh = DatasetLoadResult::Success {
            dataset: dataset(0.06),
            fetch_latency_ms: 1.0,
        };
        channel.sender.send((1, stale)).unwrap();
        channel.sender.send((2, fresh)).unwrap();

        let received = channel.try_recv().unwrap();
        assert_eq!(received.step().label(), "0.06");
        assert_eq!(channel.pending_step(), None);
        assert!(channel.try_recv().is_none());
    }

    #[test]
    fn test_only_stale_results_yield_nothing() {
        let mut channel = DatasetLoadChannel::new();
        channel.generation = 3;
        channel.pending = Some(Timestep::from_value(0.08).unwrap());

        let stale = DatasetLoadResult::Error {
            step: Timestep::from_value(0.05).unwrap(),
            message: "boom".to_string(),
        };
        channel.sender.send((2, stale)).unwrap();

        assert!(channel.try_recv().is_none());
        assert!(channel.pending_step().is_some());
    }
}
