//! Studio lighting and Lambert shading.

use glam::Vec3;

/// Converts HSL (hue in degrees, saturation and lightness in 0..=1) to RGB in 0..=1.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = lightness - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

/// A light shining from `position` towards the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector from the surface towards the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub ambient_color: Vec3,
    pub ambient_intensity: f32,
    pub lights: Vec<DirectionalLight>,
}

impl Default for Lighting {
    fn default() -> Self {
        Self::studio()
    }
}

impl Lighting {
    /// Warm key light, cool fill light and a white back light.
    pub fn studio() -> Self {
        Self {
            ambient_color: Vec3::ONE,
            ambient_intensity: 0.25,
            lights: vec![
                DirectionalLight {
                    color: hsl_to_rgb(30.0, 1.0, 0.75),
                    intensity: 0.6,
                    position: Vec3::new(-1.0, 0.0, 1.0),
                },
                DirectionalLight {
                    color: hsl_to_rgb(240.0, 0.6, 0.85),
                    intensity: 0.6,
                    position: Vec3::new(1.0, 0.0, 1.0),
                },
                DirectionalLight {
                    color: Vec3::ONE,
                    intensity: 0.4,
                    position: Vec3::new(1.0, 0.0, -1.0),
                },
            ],
        }
    }

    /// Lambert shading of a diffuse colour for a unit surface normal.
    pub fn shade(&self, diffuse: Vec3, normal: Vec3) -> Vec3 {
        let mut irradiance = self.ambient_color * self.ambient_intensity;
        for light in &self.lights {
            let lambert = normal.dot(light.direction()).max(0.0);
            irradiance += light.color * (light.intensity * lambert);
        }
        (diffuse * irradiance).clamp(Vec3::ZERO, Vec3::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(hsl_to_rgb(120.0, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)));
        assert!(close(hsl_to_rgb(240.0, 1.0, 0.5), Vec3::new(0.0, 0.0, 1.0)));
        assert!(close(hsl_to_rgb(0.0, 0.0, 1.0), Vec3::ONE));
        assert!(close(hsl_to_rgb(360.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_hsl_particle_colour() {
        // hsl(50, 65%, 75%) is a pale yellow
        let rgb = hsl_to_rgb(50.0, 0.65, 0.75);
        assert!(close(rgb, Vec3::new(0.9125, 0.8583, 0.5875)));
    }

    #[test]
    fn test_studio_rig() {
        let lighting = Lighting::studio();
        assert_eq!(lighting.lights.len(), 3);
        assert_eq!(lighting.ambient_intensity, 0.25);
        assert!(close(lighting.lights[0].color, Vec3::new(1.0, 0.75, 0.5)));
    }

    #[test]
    fn test_shade_back_facing_gets_only_ambient() {
        let lighting = Lighting::studio();
        // Pointing down is perpendicular to every light
        let shaded = lighting.shade(Vec3::ONE, Vec3::NEG_Y);
        assert!(close(shaded, Vec3::splat(0.25)));

        let lit = lighting.shade(Vec3::ONE, Vec3::Z);
        assert!(lit.x > shaded.x);
        assert!(lit.x <= 1.0);
    }
}
