//! Procedural assembly of the showcase PC
//!
//! Everything hangs off a single `rig` root so the animation loop only has to touch one
//! transform for the bob and the tilt. GPU fans are their own groups so they can spin
//! independently of the card.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::config::SceneConfig;
use crate::error::Result;
use crate::palette::MaterialPalette;
use crate::three_d::{lighting, Camera3D, CatmullRomCurve, Mesh3D, Node3D, Scene3D};
use crate::viewport::Viewport;

/// Case width
pub const CASE_WIDTH: f32 = 1.2;
/// Case height
pub const CASE_HEIGHT: f32 = 1.5;
/// Case depth
pub const CASE_DEPTH: f32 = 1.2;

const RAM_STICKS: usize = 4;
const GPU_FANS: usize = 3;
const FAN_BLADES: usize = 5;

/// Indices of the nodes the animation loop drives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RigHandles {
    /// Root group: bobs and tilts
    pub root: usize,
    /// GPU group
    pub gpu: usize,
    /// Fan groups: spin about their own Y axis
    pub fans: Vec<usize>,
}

/// A populated scene plus handles into it
#[derive(Debug, Clone)]
pub struct Rig {
    /// The scene tree, camera and lights
    pub scene: Scene3D,
    /// Nodes touched every frame
    pub handles: RigHandles,
    /// Where the palette materials live in `scene`
    pub palette: MaterialPalette,
}

/// Build the rig for a container of the given size
pub fn build(viewport: Viewport, config: &SceneConfig) -> Result<Rig> {
    let camera = Camera3D::new_perspective(
        config.camera.position(),
        config.camera.target(),
        config.camera.fov_degrees.to_radians(),
        viewport.aspect_ratio(),
    );
    let mut scene = Scene3D::new("NeonRig", camera);
    for light in lighting::rig_lighting() {
        scene.add_light(light);
    }

    let palette = MaterialPalette::install(&mut scene);
    let mut builder = RigBuilder {
        scene: &mut scene,
        palette,
    };
    let handles = builder.assemble()?;

    log::info!(
        "Built rig: {} nodes, {} meshes, {} materials",
        scene.nodes().len(),
        scene.meshes.len(),
        scene.materials().len()
    );

    Ok(Rig {
        scene,
        handles,
        palette,
    })
}

struct RigBuilder<'a> {
    scene: &'a mut Scene3D,
    palette: MaterialPalette,
}

impl RigBuilder<'_> {
    fn mesh(&mut self, mesh: Mesh3D, material: usize) -> usize {
        self.scene.add_mesh(mesh.with_material(material))
    }

    fn part(&mut self, parent: usize, name: impl Into<String>, mesh: usize, position: Vec3) -> Result<usize> {
        self.scene.add_child(parent, Node3D::with_mesh(name, mesh).at(position))
    }

    fn assemble(&mut self) -> Result<RigHandles> {
        let root = self.scene.add_node(Node3D::new("rig"));

        self.chassis(root)?;
        self.glass(root)?;
        self.motherboard(root)?;
        self.memory(root)?;
        let (gpu, fans) = self.graphics_card(root)?;
        self.cpu_cooler(root)?;
        self.coolant_tube(root)?;

        Ok(RigHandles { root, gpu, fans })
    }

    fn chassis(&mut self, root: usize) -> Result<()> {
        let (w, h, d) = (CASE_WIDTH, CASE_HEIGHT, CASE_DEPTH);
        let frame = self.palette.frame;

        let plate = self.mesh(Mesh3D::create_box(w, 0.05, d), frame);
        self.part(root, "plate_bottom", plate, Vec3::new(0.0, -h / 2.0, 0.0))?;
        self.part(root, "plate_top", plate, Vec3::new(0.0, h / 2.0, 0.0))?;

        // Front-right corner is left open behind the side glass
        let pillar = self.mesh(Mesh3D::create_box(0.1, h, 0.1), frame);
        self.part(root, "pillar_back_left", pillar, Vec3::new(-w / 2.0 + 0.05, 0.0, -d / 2.0 + 0.05))?;
        self.part(root, "pillar_back_right", pillar, Vec3::new(w / 2.0 - 0.05, 0.0, -d / 2.0 + 0.05))?;
        self.part(root, "pillar_front_left", pillar, Vec3::new(-w / 2.0 + 0.05, 0.0, d / 2.0 - 0.05))?;
        Ok(())
    }

    fn glass(&mut self, root: usize) -> Result<()> {
        let (w, h, d) = (CASE_WIDTH, CASE_HEIGHT, CASE_DEPTH);
        let glass = self.palette.glass;

        let front = self.mesh(Mesh3D::create_box(w - 0.2, h - 0.1, 0.02), glass);
        self.part(root, "glass_front", front, Vec3::new(0.0, 0.0, d / 2.0))?;

        let side = self.mesh(Mesh3D::create_box(0.02, h - 0.1, d - 0.2), glass);
        self.part(root, "glass_side", side, Vec3::new(w / 2.0, 0.0, 0.0))?;
        Ok(())
    }

    fn motherboard(&mut self, root: usize) -> Result<()> {
        let board = self.mesh(
            Mesh3D::create_box(CASE_WIDTH - 0.2, CASE_HEIGHT - 0.3, 0.05),
            self.palette.pcb,
        );
        self.part(root, "motherboard", board, Vec3::new(0.0, 0.0, -CASE_DEPTH / 2.0 + 0.1))?;
        Ok(())
    }

    fn memory(&mut self, root: usize) -> Result<()> {
        let stick = self.mesh(Mesh3D::create_box(0.02, 0.3, 0.1), self.palette.chrome);
        let light_bar = self.mesh(Mesh3D::create_box(0.02, 0.05, 0.1), self.palette.neon_cyan);
        let z = -CASE_DEPTH / 2.0 + 0.2;

        for i in 0..RAM_STICKS {
            let x = -0.2 + i as f32 * 0.04;
            self.part(root, format!("ram_{}", i), stick, Vec3::new(x, 0.2, z))?;
            self.part(root, format!("ram_light_{}", i), light_bar, Vec3::new(x, 0.35, z))?;
        }
        Ok(())
    }

    fn graphics_card(&mut self, root: usize) -> Result<(usize, Vec<usize>)> {
        let gpu = self.scene.add_child(
            root,
            Node3D::new("gpu").at(Vec3::new(0.0, -0.2, -CASE_DEPTH / 2.0 + 0.3)),
        )?;

        let body = self.mesh(Mesh3D::create_box(0.8, 0.1, 0.3), self.palette.frame);
        self.part(gpu, "gpu_body", body, Vec3::ZERO)?;

        let hub = self.mesh(Mesh3D::create_cylinder(0.12, 0.02, 16), self.palette.frame);
        let blade = self.mesh(Mesh3D::create_box(0.09, 0.004, 0.035), self.palette.pcb);
        let ring = self.mesh(Mesh3D::create_torus(0.1, 0.005, 8, 16), self.palette.neon_red);

        let mut fans = Vec::with_capacity(GPU_FANS);
        for i in 0..GPU_FANS {
            let fan = self.scene.add_child(
                gpu,
                Node3D::new(format!("fan_{}", i)).at(Vec3::new(-0.25 + i as f32 * 0.25, -0.06, 0.0)),
            )?;
            self.part(fan, format!("fan_{}_hub", i), hub, Vec3::ZERO)?;

            for b in 0..FAN_BLADES {
                let angle = b as f32 * TAU / FAN_BLADES as f32;
                let offset = Vec3::new(angle.cos(), 0.0, -angle.sin()) * 0.055;
                self.scene.add_child(
                    fan,
                    Node3D::with_mesh(format!("fan_{}_blade_{}", i, b), blade)
                        .at(offset + Vec3::new(0.0, -0.012, 0.0))
                        .rotated(Vec3::new(0.25, angle, 0.0)),
                )?;
            }

            self.scene.add_child(
                fan,
                Node3D::with_mesh(format!("fan_{}_ring", i), ring).rotated(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            )?;
            fans.push(fan);
        }

        Ok((gpu, fans))
    }

    fn cpu_cooler(&mut self, root: usize) -> Result<()> {
        let block = self.mesh(Mesh3D::create_cylinder(0.15, 0.1, 32), self.palette.frame);
        self.scene.add_child(
            root,
            Node3D::with_mesh("cpu_block", block)
                .at(Vec3::new(0.0, 0.2, -CASE_DEPTH / 2.0 + 0.15))
                .rotated(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
        )?;

        let logo = self.mesh(Mesh3D::create_disc(0.1, 32), self.palette.neon_cyan);
        self.part(root, "cpu_logo", logo, Vec3::new(0.0, 0.2, -CASE_DEPTH / 2.0 + 0.21))?;
        Ok(())
    }

    fn coolant_tube(&mut self, root: usize) -> Result<()> {
        let z = -CASE_DEPTH / 2.0;
        let curve = CatmullRomCurve::new(vec![
            Vec3::new(0.0, 0.2, z + 0.2),
            Vec3::new(0.3, 0.3, z + 0.4),
            Vec3::new(0.4, 0.6, z + 0.2),
        ]);
        let tube = self.mesh(Mesh3D::create_tube(&curve, 20, 0.02, 8), self.palette.chrome);
        self.part(root, "coolant_tube", tube, Vec3::ZERO)?;
        Ok(())
    }
}
