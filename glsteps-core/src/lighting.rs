//! Ambient plus directional lighting used by the lit cube.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    pub ambient: Vec3,
    pub color: Vec3,
    /// Direction towards the light, normalized on use.
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.3),
            color: Vec3::ONE,
            direction: Vec3::new(0.85, 0.8, 0.75),
        }
    }
}

impl DirectionalLight {
    pub fn direction(&self) -> Vec3 {
        self.direction.normalize_or_zero()
    }

    /// Per-vertex light intensity, the same equation the lighting shader runs.
    pub fn intensity(&self, normal: Vec3, normal_matrix: Mat3) -> Vec3 {
        let transformed = normal_matrix * normal;
        let directional = transformed.dot(self.direction()).max(0.0);
        self.ambient + self.color * directional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_away_gets_ambient_only() {
        let light = DirectionalLight::default();
        let away = -light.direction();
        assert_eq!(light.intensity(away, Mat3::IDENTITY), Vec3::splat(0.3));
    }

    #[test]
    fn test_facing_light_is_fully_lit() {
        let light = DirectionalLight::default();
        let lit = light.intensity(light.direction(), Mat3::IDENTITY);
        assert!((lit - Vec3::splat(1.3)).length() < 1e-5);
    }

    #[test]
    fn test_front_face_partially_lit() {
        let light = DirectionalLight::default();
        let lit = light.intensity(Vec3::Z, Mat3::IDENTITY);
        let expected = 0.3 + light.direction().z;
        assert!((lit.x - expected).abs() < 1e-5);
        assert!(lit.x > 0.3 && lit.x < 1.3);
    }

    #[test]
    fn test_uses_normal_matrix() {
        let light = DirectionalLight {
            direction: Vec3::X,
            ..Default::default()
        };
        // A quarter turn about Y moves the +Z normal onto +X.
        let turn = Mat3::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let lit = light.intensity(Vec3::Z, turn);
        assert!((lit - Vec3::splat(1.3)).length() < 1e-5);
    }
}
