//! Projection and model-view matrices.

use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Minimum distance from the camera to visible objects.
    pub near: f32,
    /// Maximum distance from the camera to visible objects.
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// Width over height, falling back to 1 for a degenerate viewport.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// The drawable area in pixels, as reported by the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        aspect_ratio(self.width, self.height)
    }

    /// Size as the signed integers `glViewport` takes, saturating at `i32::MAX`.
    pub fn gl_size(&self) -> (i32, i32) {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        (clamp(self.width), clamp(self.height))
    }
}

impl From<(u32, u32)> for Viewport {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// Which axes the model is spun around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxes {
    None,
    /// In-plane spin, used by the animated quad.
    Z,
    /// Z at full speed, Y at 0.7 and X at 0.3 of the rotation.
    Tumble,
}

/// Moves the model `distance` units in front of the camera and rotates it.
pub fn model_view(distance: f32, rotation: f32, axes: RotationAxes) -> Mat4 {
    let translation = Mat4::from_translation(Vec3::new(0.0, 0.0, -distance));
    match axes {
        RotationAxes::None => translation,
        RotationAxes::Z => translation * Mat4::from_rotation_z(rotation),
        RotationAxes::Tumble => {
            translation
                * Mat4::from_rotation_z(rotation)
                * Mat4::from_rotation_y(rotation * 0.7)
                * Mat4::from_rotation_x(rotation * 0.3)
        }
    }
}

/// The matrix used to transform normals: the inverse transpose of the model-view.
pub fn normal_matrix(model_view: Mat4) -> Mat4 {
    model_view.inverse().transpose()
}

/// Upper 3x3 part of [`normal_matrix`].
pub fn normal_matrix3(model_view: Mat4) -> Mat3 {
    Mat3::from_mat4(normal_matrix(model_view))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::Vec4;

    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_static_model_view_only_translates() {
        let mv = model_view(6.0, 1.3, RotationAxes::None);
        assert!(approx(mv.transform_point3(Vec3::ZERO), Vec3::new(0.0, 0.0, -6.0)));
        assert!(approx(mv.transform_point3(Vec3::X), Vec3::new(1.0, 0.0, -6.0)));
    }

    #[test]
    fn test_z_rotation_is_applied_in_model_space() {
        let mv = model_view(6.0, FRAC_PI_2, RotationAxes::Z);
        // Rotation happens before the translation, so the centre stays put.
        assert!(approx(mv.transform_point3(Vec3::ZERO), Vec3::new(0.0, 0.0, -6.0)));
        assert!(approx(mv.transform_point3(Vec3::X), Vec3::new(0.0, 1.0, -6.0)));
    }

    #[test]
    fn test_tumble_composes_z_then_y_then_x() {
        let r = 0.8;
        let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -6.0))
            * Mat4::from_axis_angle(Vec3::Z, r)
            * Mat4::from_axis_angle(Vec3::Y, r * 0.7)
            * Mat4::from_axis_angle(Vec3::X, r * 0.3);
        assert!(model_view(6.0, r, RotationAxes::Tumble).abs_diff_eq(expected, 1e-6));
        assert_eq!(
            model_view(6.0, 0.0, RotationAxes::Tumble),
            model_view(6.0, 0.0, RotationAxes::None)
        );
    }

    #[test]
    fn test_projection_maps_near_and_far_planes() {
        let projection = Projection::default();
        let m = projection.matrix(640.0 / 480.0);
        let near = m * Vec4::new(0.0, 0.0, -projection.near, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -projection.far, 1.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_aspect_ratio_guards_zero_height() {
        assert_eq!(aspect_ratio(640, 480), 640.0 / 480.0);
        assert_eq!(aspect_ratio(640, 0), 1.0);
    }

    #[test]
    fn test_viewport_uses_pixel_size() {
        // A HiDPI drawable is larger than the logical window; the viewport
        // must follow the drawable.
        let viewport = Viewport::from((1280, 960));
        assert_eq!(viewport.gl_size(), (1280, 960));
        assert_eq!(viewport.aspect(), 1280.0 / 960.0);
        assert_eq!(Viewport::new(800, 0).aspect(), 1.0);
        assert_eq!(Viewport::new(u32::MAX, 1).gl_size(), (i32::MAX, 1));
    }

    #[test]
    fn test_normal_matrix_of_rigid_transform_keeps_rotation() {
        let mv = model_view(6.0, 0.5, RotationAxes::Tumble);
        let n = normal_matrix3(mv);
        let rotation = Mat3::from_mat4(mv);
        assert!(n.abs_diff_eq(rotation, 1e-5));
        // Normals are unaffected by the translation part.
        assert!(approx(n * Vec3::Z, rotation * Vec3::Z));
    }
}
