use glam::Vec3;

use crate::utils::math::safe_normalize;

pub const AMBIENT: f32 = 0.25;
pub const SKIN_COLOR: Vec3 = Vec3::new(1.0, 0.8, 0.7);
pub const EYE_COLOR: Vec3 = Vec3::new(0.02, 0.02, 0.03);
pub const EYE_SPECULAR_POWER: f32 = 32.0;
pub const EYE_SPECULAR_STRENGTH: f32 = 0.6;

/// Single directional light plus ambient, the whole lighting model of the sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Unit vector pointing towards the light.
    pub direction: Vec3,
}

impl Light {
    pub fn new(direction: Vec3) -> Self {
        Self { direction: safe_normalize(direction) }
    }

    /// Ambient plus Lambert diffuse on the skin color.
    pub fn shade_skin(&self, normal: Vec3) -> Vec3 {
        let diffuse = normal.dot(self.direction).max(0.0);
        SKIN_COLOR * (AMBIENT + diffuse)
    }

    /// Blinn-Phong highlight strength seen from `view_dir`.
    pub fn specular(&self, normal: Vec3, view_dir: Vec3, power: f32) -> f32 {
        let half = safe_normalize(self.direction + view_dir);
        normal.dot(half).max(0.0).powf(power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_faces_only_get_ambient() {
        let light = Light::new(Vec3::Y);
        assert_eq!(light.shade_skin(-Vec3::Y), SKIN_COLOR * AMBIENT);
        assert_eq!(light.shade_skin(Vec3::Y), SKIN_COLOR * (AMBIENT + 1.0));
    }

    #[test]
    fn specular_peaks_on_half_vector() {
        let light = Light::new(Vec3::Y);
        let n = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert!((light.specular(n, Vec3::Z, 32.0) - 1.0).abs() < 1e-4);
        assert!(light.specular(-n, Vec3::Z, 32.0) == 0.0);
    }
}
