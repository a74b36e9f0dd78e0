//! The fixed set of shading descriptors the rig is dressed in

use crate::primitives::Color;
use crate::three_d::{Material3D, Scene3D};

/// Indices of the palette materials inside a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialPalette {
    /// Dark brushed metal for the chassis, GPU shroud and fan hubs
    pub frame: usize,
    /// Tinted tempered glass panels
    pub glass: usize,
    /// Matte circuit board
    pub pcb: usize,
    /// Mirror finish for RAM heat spreaders and tubing
    pub chrome: usize,
    /// Cyan glow
    pub neon_cyan: usize,
    /// Red glow
    pub neon_red: usize,
}

impl MaterialPalette {
    /// Descriptors in palette order
    pub fn descriptors() -> Vec<Material3D> {
        vec![
            Material3D::new_pbr("frame", Color::from_rgb(0x111111), 0.8, 0.2),
            Material3D::new_pbr("glass", Color::WHITE, 0.1, 0.0)
                .with_opacity(0.3)
                .double_sided(),
            Material3D::new_pbr("pcb", Color::from_rgb(0x050505), 0.0, 0.8),
            Material3D::new_pbr("chrome", Color::WHITE, 1.0, 0.0),
            Material3D::new_pbr("neon_cyan", Color::BLACK, 0.0, 1.0)
                .with_emissive(Color::from_rgb(0x00f0ff), 3.0),
            Material3D::new_pbr("neon_red", Color::BLACK, 0.0, 1.0)
                .with_emissive(Color::from_rgb(0xff2a2a), 3.0),
        ]
    }

    /// Add every descriptor to `scene` and remember where they landed
    pub fn install(scene: &mut Scene3D) -> Self {
        let base = scene.materials().len();
        for material in Self::descriptors() {
            scene.add_material(material);
        }
        Self {
            frame: base,
            glass: base + 1,
            pcb: base + 2,
            chrome: base + 3,
            neon_cyan: base + 4,
            neon_red: base + 5,
        }
    }
}
