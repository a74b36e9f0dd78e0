//! Perspective camera

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// 3D camera for viewing the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera3D {
    /// Camera position in world space
    pub position: Vec3,
    /// Target position the camera is looking at
    pub target: Vec3,
    /// Up vector (usually Y-axis)
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect_ratio: f32,
}

impl Camera3D {
    /// Create a new perspective camera
    pub fn new_perspective(position: Vec3, target: Vec3, fov: f32, aspect_ratio: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov,
            near: 0.1,
            far: 1000.0,
            aspect_ratio,
        }
    }

    /// Get the view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio (e.g., when the container resizes)
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_looks_down_negative_z() {
        let camera = Camera3D::new_perspective(
            Vec3::new(4.0, 2.0, 5.0),
            Vec3::new(4.0, 2.0, 0.0),
            45f32.to_radians(),
            1.5,
        );
        // A point straight ahead lands in the centre of clip space
        let clip = camera.view_projection_matrix() * Vec3::new(4.0, 2.0, -1.0).extend(1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }

    #[test]
    fn test_set_aspect_ratio() {
        let mut camera = Camera3D::new_perspective(Vec3::Z, Vec3::ZERO, 1.0, 1.0);
        camera.set_aspect_ratio(16.0 / 9.0);
        assert_eq!(camera.aspect_ratio, 16.0 / 9.0);
    }
}
