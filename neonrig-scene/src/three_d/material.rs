//! Material descriptors for 3D objects

use crate::primitives::Color;
use serde::{Deserialize, Serialize};

/// A material defines how a surface looks.
///
/// Materials are built once by the palette and then only ever read; the scene hands
/// them out as a shared slice, so every node using "chrome" sees the same descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material3D {
    /// Material name
    pub name: String,
    /// Base color
    pub base_color: Color,
    /// Metallic factor (0.0 = dielectric, 1.0 = metal)
    pub metallic: f32,
    /// Roughness factor (0.0 = smooth, 1.0 = rough)
    pub roughness: f32,
    /// Emissive color (for glowing materials)
    pub emissive: Color,
    /// Multiplier applied to `emissive`
    pub emissive_intensity: f32,
    /// Opacity (1.0 = opaque)
    pub opacity: f32,
    /// Double-sided rendering
    pub double_sided: bool,
}

impl Material3D {
    /// Create a new PBR material
    pub fn new_pbr(name: impl Into<String>, base_color: Color, metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.into(),
            base_color,
            metallic,
            roughness,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            opacity: 1.0,
            double_sided: false,
        }
    }

    /// Make the material glow
    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    /// Make the material see-through
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Render both faces
    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    /// Whether the renderer has to blend this material
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// Emissive color with the intensity folded in
    pub fn emitted(&self) -> Color {
        self.emissive.scaled(self.emissive_intensity)
    }
}

impl Default for Material3D {
    fn default() -> Self {
        Self::new_pbr("Default", Color::new(0.8, 0.8, 0.8, 1.0), 0.0, 0.5)
    }
}
