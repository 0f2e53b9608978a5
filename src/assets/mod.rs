//! Static asset addressing and fetching.
//!
//! Particle datasets and the nozzle model are plain files served next to
//! the app. On WASM they are fetched over HTTP relative to the page; on
//! native they are read from the working directory.

mod fetch;

pub use fetch::fetch_bytes;

use crate::particles::Timestep;

/// Errors that can occur while loading an asset.
#[derive(Debug, Clone)]
pub enum LoadError {
    /// The request could not be issued or the response could not be read.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    Fetch(String),
    /// The server answered with a non-success status.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    HttpStatus(u16),
    /// A native filesystem read failed.
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    Io(String),
    /// The CSV payload could not be read.
    Csv(String),
    /// A required CSV column is absent.
    MissingColumn(&'static str),
    /// The OBJ/MTL payload could not be parsed.
    Model(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch(msg) => write!(f, "Fetch failed: {}", msg),
            LoadError::HttpStatus(status) => write!(f, "HTTP status {}", status),
            LoadError::Io(msg) => write!(f, "Read failed: {}", msg),
            LoadError::Csv(msg) => write!(f, "CSV error: {}", msg),
            LoadError::MissingColumn(name) => write!(f, "Missing column '{}'", name),
            LoadError::Model(msg) => write!(f, "Model error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

/// Locations of the particle datasets and the static model.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPaths {
    pub data_root: String,
    pub model_root: String,
    pub model_name: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            data_root: "particles".to_string(),
            model_root: "models".to_string(),
            model_name: "nozzle".to_string(),
        }
    }
}

impl AssetPaths {
    /// Path of the dataset for a timestep, e.g. `particles/0.05.csv`.
    pub fn dataset_path(&self, step: Timestep) -> String {
        join(&self.data_root, &format!("{}.csv", step.label()))
    }

    pub fn model_obj_path(&self) -> String {
        join(&self.model_root, &format!("{}.obj", self.model_name))
    }

    pub fn model_mtl_path(&self) -> String {
        join(&self.model_root, &format!("{}.mtl", self.model_name))
    }
}

fn join(root: &str, file: &str) -> String {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", root, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_path_uses_two_decimal_label() {
        let paths = AssetPaths::default();
        let step = Timestep::from_value(0.05).unwrap();
        assert_eq!(paths.dataset_path(step), "particles/0.05.csv");
    }

    #[test]
    fn test_model_paths_handle_trailing_slash_and_empty_root() {
        let paths = AssetPaths {
            data_root: String::new(),
            model_root: "assets/models/".to_string(),
            model_name: "nozzle".to_string(),
        };
        assert_eq!(paths.model_obj_path(), "assets/models/nozzle.obj");
        assert_eq!(paths.model_mtl_path(), "assets/models/nozzle.mtl");
        let step = Timestep::from_value(0.13).unwrap();
        assert_eq!(paths.dataset_path(step), "0.13.csv");
    }
}
