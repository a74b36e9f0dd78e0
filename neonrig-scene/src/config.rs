//! Tunables for the rig scene

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::MotionTuning;
use crate::interaction::TrackingZone;

/// Scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Id of the element the canvas is appended to
    #[serde(default = "default_container_id")]
    pub container_id: String,

    /// Camera placement
    #[serde(default)]
    pub camera: CameraConfig,

    /// Per-frame animation constants
    #[serde(default)]
    pub motion: MotionTuning,

    /// Part of the viewport where the pointer steers the rig
    #[serde(default)]
    pub tracking_zone: TrackingZone,

    /// Tone-mapping exposure
    #[serde(default = "default_exposure")]
    pub exposure: f32,
}

/// Camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f32,

    /// Eye position
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],

    /// Defaults to straight down -Z from `position`, leaving the rig low and left of frame
    #[serde(default = "default_camera_target")]
    pub target: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            camera: CameraConfig::default(),
            motion: MotionTuning::default(),
            tracking_zone: TrackingZone::default(),
            exposure: default_exposure(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: default_fov_degrees(),
            position: default_camera_position(),
            target: default_camera_target(),
        }
    }
}

impl CameraConfig {
    /// Eye position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Look-at target as a vector
    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.target)
    }
}

fn default_container_id() -> String { "pc-container".to_string() }
fn default_exposure() -> f32 { 1.2 }
fn default_fov_degrees() -> f32 { 45.0 }
fn default_camera_position() -> [f32; 3] { [4.0, 2.0, 5.0] }
fn default_camera_target() -> [f32; 3] { [4.0, 2.0, 0.0] }
