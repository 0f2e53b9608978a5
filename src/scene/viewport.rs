//! The 3D viewport: camera, lights, model and particles painted with egui.
//!
//! Geometry is projected on the CPU with the camera's view-projection
//! matrix and handed to egui as two meshes per frame: depth-sorted,
//! Lambert-shaded model triangles, then screen-space particle quads.

use super::camera::OrbitCamera;
use super::lighting::Lighting;
use super::model::MeshModel;
use super::points::PointCloud;
use eframe::egui::{self, Color32, Mesh, Painter, Pos2, Rect};
use glam::{Mat4, Vec3, Vec4Swizzles};

/// Canvas background.
pub const BACKGROUND: Color32 = Color32::from_rgb(12, 12, 16);

/// Smallest on-screen particle edge, in points.
const MIN_POINT_PIXELS: f32 = 1.0;

/// A world position projected into a screen rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub pos: Pos2,
    /// Distance along the view axis
    pub depth: f32,
}

/// Projects `point` with `view_projection` into `rect`.
///
/// Returns `None` for points outside the near/far range.
pub fn project(view_projection: &Mat4, point: Vec3, rect: Rect) -> Option<Projected> {
    let clip = *view_projection * point.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.xyz() / clip.w;
    if !(-1.0..=1.0).contains(&ndc.z) {
        return None;
    }

    let center = rect.center();
    Some(Projected {
        pos: Pos2::new(
            center.x + ndc.x * rect.width() / 2.0,
            center.y - ndc.y * rect.height() / 2.0,
        ),
        depth: clip.w,
    })
}

fn to_color32(rgb: Vec3) -> Color32 {
    let c = rgb.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    Color32::from_rgb(c.x.round() as u8, c.y.round() as u8, c.z.round() as u8)
}

/// Owns everything needed to paint the scene and tracks when it needs
/// repainting.
pub struct Viewport {
    pub camera: OrbitCamera,
    pub lighting: Lighting,
    model: Option<MeshModel>,
    points: Option<PointCloud>,
    size: (f32, f32),
    render_requested: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            camera: OrbitCamera::default(),
            lighting: Lighting::studio(),
            model: None,
            points: None,
            size: (0.0, 0.0),
            render_requested: false,
        }
    }

    /// Requests a repaint of the current scene. Repeated calls before the
    /// next frame collapse into one.
    pub fn render(&mut self) {
        self.render_requested = true;
    }

    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    /// Matches the camera to a new surface size and re-renders.
    ///
    /// Zero sizes and unchanged sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 || (width, height) == self.size {
            return;
        }
        self.size = (width, height);
        self.camera.set_aspect(width, height);
        self.render();
    }

    /// Replaces the displayed particles.
    pub fn set_points(&mut self, cloud: PointCloud) {
        self.points = Some(cloud);
        self.render();
    }

    pub fn points(&self) -> Option<&PointCloud> {
        self.points.as_ref()
    }

    pub fn set_point_size(&mut self, size: f32) {
        if let Some(points) = &mut self.points {
            points.size = size;
        }
        self.render();
    }

    pub fn set_model(&mut self, model: MeshModel) {
        self.model = Some(model);
        self.render();
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
        self.render();
    }

    /// Paints the scene into `rect`.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, BACKGROUND);

        let view_projection = self.camera.view_projection();
        if let Some(model) = &self.model {
            painter.add(egui::Shape::mesh(self.model_mesh(
                model,
                &view_projection,
                rect,
            )));
        }
        if let Some(points) = &self.points {
            painter.add(egui::Shape::mesh(points_mesh(points, &view_projection, rect)));
        }
    }

    /// Back-to-front shaded triangles of the model.
    fn model_mesh(&self, model: &MeshModel, view_projection: &Mat4, rect: Rect) -> Mesh {
        let eye = self.camera.eye_position();

        let mut visible: Vec<(f32, [Pos2; 3], Color32)> = model
            .triangles
            .iter()
            .filter_map(|triangle| {
                let a = project(view_projection, triangle.vertices[0], rect)?;
                let b = project(view_projection, triangle.vertices[1], rect)?;
                let c = project(view_projection, triangle.vertices[2], rect)?;

                // Two-sided: light the side facing the camera
                let mut normal = triangle.normal;
                if normal.dot(eye - triangle.centroid()) < 0.0 {
                    normal = -normal;
                }
                let color = to_color32(self.lighting.shade(triangle.diffuse, normal));
                let depth = (a.depth + b.depth + c.depth) / 3.0;
                Some((depth, [a.pos, b.pos, c.pos], color))
            })
            .collect();

        visible.sort_by(|x, y| y.0.total_cmp(&x.0));

        let mut mesh = Mesh::default();
        for (_, [a, b, c], color) in visible {
            let base = mesh.vertices.len() as u32;
            mesh.colored_vertex(a, color);
            mesh.colored_vertex(b, color);
            mesh.colored_vertex(c, color);
            mesh.add_triangle(base, base + 1, base + 2);
        }
        mesh
    }
}

/// Particle quads sized like distance-attenuated GL points.
fn points_mesh(cloud: &PointCloud, view_projection: &Mat4, rect: Rect) -> Mesh {
    let color = to_color32(cloud.color);
    let scale = rect.height() / 2.0;

    let mut mesh = Mesh::default();
    for &position in &cloud.positions {
        let Some(projected) = project(view_projection, position, rect) else {
            continue;
        };
        let edge = (cloud.size * scale / projected.depth).max(MIN_POINT_PIXELS);
        let quad = Rect::from_center_size(projected.pos, egui::vec2(edge, edge));
        if rect.intersects(quad) {
            mesh.add_colored_rect(quad, color);
        }
    }
    mesh
}
