//! Static nozzle model loaded from OBJ/MTL.
//!
//! The model is fetched once at startup. Parsing is delegated to `tobj`;
//! the scene only keeps world-space triangles with a face normal and the
//! material's diffuse colour.

use crate::assets::{fetch_bytes, AssetPaths, LoadError};
use eframe::egui;
use glam::Vec3;
use std::io::Cursor;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Uniform scale applied to the raw OBJ coordinates.
pub const MODEL_SCALE: f32 = 20.0;

/// World offset applied after scaling.
pub const MODEL_OFFSET: Vec3 = Vec3::new(-0.001, -0.0905, 0.0);

/// Diffuse colour for faces without a material.
const FALLBACK_DIFFUSE: Vec3 = Vec3::splat(0.8);

/// One world-space triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
    /// Unit face normal from counter-clockwise winding
    pub normal: Vec3,
    pub diffuse: Vec3,
}

impl Triangle {
    pub fn centroid(&self) -> Vec3 {
        (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
    }
}

/// Triangulated model ready for painting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshModel {
    pub triangles: Vec<Triangle>,
}

impl MeshModel {
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Parses OBJ geometry, resolving materials from `mtl` when given.
///
/// A missing or broken MTL is not fatal: affected faces use a light grey.
pub fn parse_model(obj: &[u8], mtl: Option<&[u8]>) -> Result<MeshModel, LoadError> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let (models, materials) =
        tobj::load_obj_buf(&mut Cursor::new(obj), &options, |_| match mtl {
            Some(bytes) => tobj::load_mtl_buf(&mut Cursor::new(bytes)),
            None => Err(tobj::LoadError::OpenFileFailed),
        })
        .map_err(|e| LoadError::Model(e.to_string()))?;

    let materials = materials.unwrap_or_else(|e| {
        log::warn!("Model materials unavailable, using fallback colour: {}", e);
        Vec::new()
    });

    let mut triangles = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let diffuse = mesh
            .material_id
            .and_then(|id| materials.get(id))
            .and_then(|m| m.diffuse)
            .map(Vec3::from)
            .unwrap_or(FALLBACK_DIFFUSE);

        let vertex = |index: u32| -> Option<Vec3> {
            let i = index as usize * 3;
            let p = mesh.positions.get(i..i + 3)?;
            Some(Vec3::new(p[0], p[1], p[2]) * MODEL_SCALE + MODEL_OFFSET)
        };

        for face in mesh.indices.chunks_exact(3) {
            let (Some(a), Some(b), Some(c)) = (vertex(face[0]), vertex(face[1]), vertex(face[2]))
            else {
                log::warn!("Skipping face with out-of-range index in '{}'", model.name);
                continue;
            };

            let normal = (b - a).cross(c - a);
            if normal.length_squared() <= f32::EPSILON * f32::EPSILON {
                continue;
            }

            triangles.push(Triangle {
                vertices: [a, b, c],
                normal: normal.normalize(),
                diffuse,
            });
        }
    }

    Ok(MeshModel { triangles })
}

/// Result of the model load.
#[derive(Debug, Clone)]
pub enum ModelLoadResult {
    Success(MeshModel),
    Error(String),
}

/// Channel for the one-off model load at startup.
pub struct ModelLoadChannel {
    sender: Sender<ModelLoadResult>,
    receiver: Receiver<ModelLoadResult>,
    loading: bool,
}

impl Default for ModelLoadChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelLoadChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            loading: false,
        }
    }

    /// Fetches the MTL and OBJ files and parses them off the UI thread.
    pub fn load(&mut self, ctx: egui::Context, paths: &AssetPaths) {
        if self.loading {
            return;
        }
        self.loading = true;

        let obj_path = paths.model_obj_path();
        let mtl_path = paths.model_mtl_path();
        let sender = self.sender.clone();

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || {
                let result = pollster::block_on(load_model(obj_path, mtl_path));
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = load_model(obj_path, mtl_path).await;
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }
    }

    pub fn try_recv(&mut self) -> Option<ModelLoadResult> {
        let result = self.receiver.try_recv().ok()?;
        self.loading = false;
        Some(result)
    }
}

async fn load_model(obj_path: String, mtl_path: String) -> ModelLoadResult {
    let mtl = match fetch_bytes(&mtl_path).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("Failed to load {}: {}", mtl_path, e);
            None
        }
    };

    let outcome = match fetch_bytes(&obj_path).await {
        Ok(obj) => parse_model(&obj, mtl.as_deref()),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(model) => {
            if model.is_empty() {
                log::warn!("Model {} has no drawable faces", obj_path);
            }
            log::info!("Loaded model {} ({} triangles)", obj_path, model.len());
            ModelLoadResult::Success(model)
        }
        Err(e) => {
            log::error!("Failed to load model {}: {}", obj_path, e);
            ModelLoadResult::Error(e.to_string())
        }
    }
}
