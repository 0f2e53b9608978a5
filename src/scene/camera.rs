//! Orbit camera with pan and zoom.
//!
//! Spherical coordinates around a target point. The default pose looks at
//! the origin from `(71, 71, 71)` through a very narrow field of view, which
//! gives the nozzle an almost orthographic look.

use glam::{Mat4, Vec2, Vec3};

/// Default eye position.
pub const DEFAULT_EYE: Vec3 = Vec3::new(71.0, 71.0, 71.0);

const DEFAULT_FOV_DEGREES: f32 = 1.0;
const MIN_PHI: f32 = 0.01;
const MAX_PHI: f32 = std::f32::consts::PI - 0.01;

/// A perspective camera orbiting a target.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera orbits around / looks at
    pub target: Vec3,
    /// Distance from target
    pub radius: f32,
    /// Azimuth around the Y axis, radians
    pub theta: f32,
    /// Polar angle from the Y axis, radians
    pub phi: f32,
    /// Vertical field of view, radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Surface width over height
    pub aspect: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(DEFAULT_EYE, Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Camera placed at `eye` looking at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            target,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            fov_y: DEFAULT_FOV_DEGREES.to_radians(),
            near: 1.0,
            far: 1000.0,
            aspect: 1.0,
        }
    }

    /// Back to the default pose. Aspect is kept.
    pub fn reset(&mut self) {
        let aspect = self.aspect;
        *self = Self::default();
        self.aspect = aspect;
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye_position()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Rotates around the target. Deltas in radians.
    pub fn orbit(&mut self, delta_theta: f32, delta_phi: f32) {
        self.theta += delta_theta;
        self.phi = (self.phi + delta_phi).clamp(MIN_PHI, MAX_PHI);
    }

    /// Moves the target in the view plane so the scene follows the pointer.
    pub fn pan(&mut self, delta_screen: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        // World units covered by one pixel at the target's depth
        let scale = 2.0 * self.radius * (self.fov_y / 2.0).tan() / viewport_height;
        self.target -= self.right() * (delta_screen.x * scale);
        self.target += self.up() * (delta_screen.y * scale);
    }

    /// Multiplicative zoom. Positive `delta` moves closer.
    pub fn zoom(&mut self, delta: f32) {
        let factor = (1.0 - delta * 0.1).max(0.1);
        self.radius = (self.radius * factor).clamp(self.near, self.far);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pose() {
        let camera = OrbitCamera::default();
        let eye = camera.eye_position();
        assert!((eye - DEFAULT_EYE).length() < 1e-3);
        assert!((camera.fov_y.to_degrees() - 1.0).abs() < 1e-5);
        assert_eq!(camera.near, 1.0);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let mut camera = OrbitCamera::default();
        camera.set_aspect(1600.0, 900.0);
        let clip = camera.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        assert!((clip.x / clip.w).abs() < 1e-4);
        assert!((clip.y / clip.w).abs() < 1e-4);
    }

    #[test]
    fn test_orbit_clamps_phi() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.0, -10.0);
        assert_eq!(camera.phi, MIN_PHI);
        camera.orbit(0.5, 20.0);
        assert_eq!(camera.phi, MAX_PHI);
    }

    #[test]
    fn test_zoom_and_reset() {
        let mut camera = OrbitCamera::default();
        camera.set_aspect(2.0, 1.0);
        let start = camera.radius;

        camera.zoom(1.0);
        assert!(camera.radius < start);
        camera.zoom(-1000.0);
        assert!(camera.radius <= camera.far);

        camera.pan(Vec2::new(30.0, 10.0), 500.0);
        assert_ne!(camera.target, Vec3::ZERO);

        camera.reset();
        assert_eq!(camera.target, Vec3::ZERO);
        assert!((camera.radius - start).abs() < 1e-4);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_zero_size_keeps_aspect() {
        let mut camera = OrbitCamera::default();
        camera.set_aspect(0.0, 100.0);
        assert_eq!(camera.aspect, 1.0);
    }
}
