//! Lighting for the rig scene

use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::primitives::Color;

/// Types of lights supported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LightType {
    /// Ambient light - uniform lighting from all directions
    Ambient {
        /// Light color
        color: Color,
        /// Intensity
        intensity: f32,
    },
    /// Directional light - parallel rays (like the sun)
    Directional {
        /// Direction the light is pointing
        direction: Vec3,
        /// Light color
        color: Color,
        /// Intensity
        intensity: f32,
    },
    /// Point light - radiates from a point in all directions
    Point {
        /// Position of the light
        position: Vec3,
        /// Light color
        color: Color,
        /// Intensity
        intensity: f32,
        /// Distance at which the light fades to zero
        range: f32,
    },
}

/// A light source in the 3D scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Unique identifier
    pub id: String,
    /// Type of light
    pub light_type: LightType,
    /// Whether the light is enabled
    pub enabled: bool,
}

impl Light {
    /// Create a new ambient light
    pub fn new_ambient(id: impl Into<String>, color: Color, intensity: f32) -> Self {
        Self {
            id: id.into(),
            light_type: LightType::Ambient { color, intensity },
            enabled: true,
        }
    }

    /// Create a directional light shining from `position` toward the origin
    pub fn new_directional_from(id: impl Into<String>, position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            id: id.into(),
            light_type: LightType::Directional {
                direction: (-position).normalize_or_zero(),
                color,
                intensity,
            },
            enabled: true,
        }
    }

    /// Create a new point light
    pub fn new_point(id: impl Into<String>, position: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            id: id.into(),
            light_type: LightType::Point {
                position,
                color,
                intensity,
                range,
            },
            enabled: true,
        }
    }
}

/// Key, fill and the two neon accents around the case
pub fn rig_lighting() -> Vec<Light> {
    vec![
        Light::new_ambient("ambient", Color::WHITE, 0.2),
        Light::new_directional_from("key", Vec3::new(5.0, 10.0, 7.0), Color::WHITE, 1.5),
        Light::new_point("cyan_accent", Vec3::new(-2.0, 1.0, 2.0), Color::from_rgb(0x00f0ff), 2.0, 10.0),
        Light::new_point("red_accent", Vec3::new(2.0, 3.0, -2.0), Color::from_rgb(0xff2a2a), 2.0, 10.0),
    ]
}
