//! 3D scene management

use crate::error::{Result, SceneError};
use crate::three_d::{Camera3D, Light, Material3D, Mesh3D};
use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node in the 3D scene graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node3D {
    /// Node name
    pub name: String,
    /// Local position relative to the parent
    pub position: Vec3,
    /// Local rotation (euler angles in radians, XYZ order)
    pub rotation: Vec3,
    /// Local scale
    pub scale: Vec3,
    /// Mesh index (if this node has geometry)
    pub mesh_index: Option<usize>,
    /// Parent node index, `None` for roots
    pub parent: Option<usize>,
    /// Children node indices
    pub children: Vec<usize>,
}

impl Node3D {
    /// Create a new empty group node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            mesh_index: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a node drawing `mesh_index`
    pub fn with_mesh(name: impl Into<String>, mesh_index: usize) -> Self {
        let mut node = Self::new(name);
        node.mesh_index = Some(mesh_index);
        node
    }

    /// Builder-style position
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder-style rotation
    pub fn rotated(mut self, euler: Vec3) -> Self {
        self.rotation = euler;
        self
    }

    /// Local transform matrix
    pub fn local_transform(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// One mesh to draw with its resolved world transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    /// Index into [`Scene3D::meshes`]
    pub mesh_index: usize,
    /// World transform of the owning node
    pub world: Mat4,
}

/// A complete 3D scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene3D {
    /// Scene name
    pub name: String,
    /// All nodes in the scene
    nodes: Vec<Node3D>,
    /// Root node indices
    roots: Vec<usize>,
    /// All meshes
    pub meshes: Vec<Mesh3D>,
    /// All materials, read-only once added
    materials: Vec<Material3D>,
    /// All lights
    pub lights: Vec<Light>,
    /// Active camera
    pub camera: Camera3D,
    /// Named node lookup
    node_map: HashMap<String, usize>,
}

impl Scene3D {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>, camera: Camera3D) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            roots: Vec::new(),
            meshes: Vec::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            camera,
            node_map: HashMap::new(),
        }
    }

    /// Add a root node to the scene
    pub fn add_node(&mut self, mut node: Node3D) -> usize {
        let index = self.nodes.len();
        node.parent = None;
        self.node_map.insert(node.name.clone(), index);
        self.nodes.push(node);
        self.roots.push(index);
        index
    }

    /// Attach a child to an existing parent
    pub fn add_child(&mut self, parent_index: usize, mut child: Node3D) -> Result<usize> {
        if parent_index >= self.nodes.len() {
            return Err(SceneError::MissingParent(parent_index));
        }

        let child_index = self.nodes.len();
        child.parent = Some(parent_index);
        self.node_map.insert(child.name.clone(), child_index);
        self.nodes.push(child);
        self.nodes[parent_index].children.push(child_index);

        Ok(child_index)
    }

    /// Add a mesh
    pub fn add_mesh(&mut self, mesh: Mesh3D) -> usize {
        let index = self.meshes.len();
        self.meshes.push(mesh);
        index
    }

    /// Add a material
    pub fn add_material(&mut self, material: Material3D) -> usize {
        let index = self.materials.len();
        self.materials.push(material);
        index
    }

    /// Add a light
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> &[Node3D] {
        &self.nodes
    }

    /// Root node indices
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// All materials
    pub fn materials(&self) -> &[Material3D] {
        &self.materials
    }

    /// Material assigned to a mesh, if any
    pub fn material_for(&self, mesh: &Mesh3D) -> Option<&Material3D> {
        mesh.material_index.and_then(|idx| self.materials.get(idx))
    }

    /// Get a node by index
    pub fn node(&self, index: usize) -> Option<&Node3D> {
        self.nodes.get(index)
    }

    /// Get a mutable node by index
    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node3D> {
        self.nodes.get_mut(index)
    }

    /// Get a node by name
    pub fn get_node(&self, name: &str) -> Option<&Node3D> {
        self.node_map.get(name).and_then(|&idx| self.nodes.get(idx))
    }

    /// Index of a named node
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.node_map.get(name).copied()
    }

    /// Calculate world transform for a node by walking up its parents
    pub fn world_transform(&self, node_index: usize) -> Mat4 {
        let mut transform = Mat4::IDENTITY;
        let mut current = Some(node_index);
        while let Some(idx) = current {
            match self.nodes.get(idx) {
                Some(node) => {
                    transform = node.local_transform() * transform;
                    current = node.parent;
                }
                None => break,
            }
        }
        transform
    }

    /// Flatten the tree into draw calls, parents before children
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let mut items = Vec::new();
        for &root in &self.roots {
            self.collect_draws(root, Mat4::IDENTITY, &mut items);
        }
        items
    }

    fn collect_draws(&self, node_index: usize, parent_transform: Mat4, items: &mut Vec<DrawItem>) {
        let Some(node) = self.nodes.get(node_index) else {
            return;
        };
        let world = parent_transform * node.local_transform();

        if let Some(mesh_index) = node.mesh_index {
            items.push(DrawItem { mesh_index, world });
        }

        for &child in &node.children {
            self.collect_draws(child, world, items);
        }
    }
}
