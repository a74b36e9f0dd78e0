//! 3D mesh representation and the primitive shapes the rig is built from

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::curve::CatmullRomCurve;

/// A 3D vertex with position, normal, and texture coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex3D {
    /// Position in 3D space
    pub position: Vec3,
    /// Surface normal
    pub normal: Vec3,
    /// Texture coordinates
    pub tex_coords: Vec2,
}

impl Vertex3D {
    /// Create a new vertex
    pub fn new(position: Vec3, normal: Vec3, tex_coords: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coords,
        }
    }
}

/// A 3D mesh containing vertices and indices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh3D {
    /// Mesh name
    pub name: String,
    /// Vertex data
    pub vertices: Vec<Vertex3D>,
    /// Index data (triangles, counter-clockwise front faces)
    pub indices: Vec<u32>,
    /// Material index
    pub material_index: Option<usize>,
}

impl Mesh3D {
    /// Create a new mesh
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            indices: Vec::new(),
            material_index: None,
        }
    }

    /// Assign a material index
    pub fn with_material(mut self, material_index: usize) -> Self {
        self.material_index = Some(material_index);
        self
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Calculate bounding box
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        if self.vertices.is_empty() {
            return (Vec3::ZERO, Vec3::ZERO);
        }

        let mut min = self.vertices[0].position;
        let mut max = self.vertices[0].position;

        for vertex in &self.vertices[1..] {
            min = min.min(vertex.position);
            max = max.max(vertex.position);
        }

        (min, max)
    }

    /// Axis-aligned box centred on the origin
    pub fn create_box(width: f32, height: f32, depth: f32) -> Self {
        let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

        let vertices = vec![
            // Front face
            Vertex3D::new(Vec3::new(-x, -y, z), Vec3::Z, Vec2::new(0.0, 0.0)),
            Vertex3D::new(Vec3::new(x, -y, z), Vec3::Z, Vec2::new(1.0, 0.0)),
            Vertex3D::new(Vec3::new(x, y, z), Vec3::Z, Vec2::new(1.0, 1.0)),
            Vertex3D::new(Vec3::new(-x, y, z), Vec3::Z, Vec2::new(0.0, 1.0)),

            // Back face
            Vertex3D::new(Vec3::new(-x, -y, -z), -Vec3::Z, Vec2::new(1.0, 0.0)),
            Vertex3D::new(Vec3::new(-x, y, -z), -Vec3::Z, Vec2::new(1.0, 1.0)),
            Vertex3D::new(Vec3::new(x, y, -z), -Vec3::Z, Vec2::new(0.0, 1.0)),
            Vertex3D::new(Vec3::new(x, -y, -z), -Vec3::Z, Vec2::new(0.0, 0.0)),

            // Top face
            Vertex3D::new(Vec3::new(-x, y, -z), Vec3::Y, Vec2::new(0.0, 1.0)),
            Vertex3D::new(Vec3::new(-x, y, z), Vec3::Y, Vec2::new(0.0, 0.0)),
            Vertex3D::new(Vec3::new(x, y, z), Vec3::Y, Vec2::new(1.0, 0.0)),
            Vertex3D::new(Vec3::new(x, y, -z), Vec3::Y, Vec2::new(1.0, 1.0)),

            // Bottom face
            Vertex3D::new(Vec3::new(-x, -y, -z), -Vec3::Y, Vec2::new(1.0, 1.0)),
            Vertex3D::new(Vec3::new(x, -y, -z), -Vec3::Y, Vec2::new(0.0, 1.0)),
            Vertex3D::new(Vec3::new(x, -y, z), -Vec3::Y, Vec2::new(0.0, 0.0)),
            Vertex3D::new(Vec3::new(-x, -y, z), -Vec3::Y, Vec2::new(1.0, 0.0)),

            // Right face
            Vertex3D::new(Vec3::new(x, -y, -z), Vec3::X, Vec2::new(1.0, 0.0)),
            Vertex3D::new(Vec3::new(x, y, -z), Vec3::X, Vec2::new(1.0, 1.0)),
            Vertex3D::new(Vec3::new(x, y, z), Vec3::X, Vec2::new(0.0, 1.0)),
            Vertex3D::new(Vec3::new(x, -y, z), Vec3::X, Vec2::new(0.0, 0.0)),

            // Left face
            Vertex3D::new(Vec3::new(-x, -y, -z), -Vec3::X, Vec2::new(0.0, 0.0)),
            Vertex3D::new(Vec3::new(-x, -y, z), -Vec3::X, Vec2::new(1.0, 0.0)),
            Vertex3D::new(Vec3::new(-x, y, z), -Vec3::X, Vec2::new(1.0, 1.0)),
            Vertex3D::new(Vec3::new(-x, y, -z), -Vec3::X, Vec2::new(0.0, 1.0)),
        ];

        let indices = vec![
            0, 1, 2, 2, 3, 0,       // front
            4, 5, 6, 6, 7, 4,       // back
            8, 9, 10, 10, 11, 8,    // top
            12, 13, 14, 14, 15, 12, // bottom
            16, 17, 18, 18, 19, 16, // right
            20, 21, 22, 22, 23, 20, // left
        ];

        Self {
            name: "Box".to_string(),
            vertices,
            indices,
            material_index: None,
        }
    }

    /// Capped cylinder around the Y axis, centred on the origin
    pub fn create_cylinder(radius: f32, height: f32, radial_segments: u32) -> Self {
        let segments = radial_segments.max(3);
        let half = height * 0.5;
        let mut mesh = Self::new("Cylinder");

        // Side wall: top ring then bottom ring
        for row in 0..=1u32 {
            let y = half - row as f32 * height;
            for segment in 0..=segments {
                let u = segment as f32 / segments as f32;
                let (sin, cos) = (u * TAU).sin_cos();
                mesh.vertices.push(Vertex3D::new(
                    Vec3::new(radius * sin, y, radius * cos),
                    Vec3::new(sin, 0.0, cos),
                    Vec2::new(u, 1.0 - row as f32),
                ));
            }
        }

        let stride = segments + 1;
        for segment in 0..segments {
            let a = segment;
            let b = stride + segment;
            let c = stride + segment + 1;
            let d = segment + 1;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }

        mesh.push_cap(radius, half, segments, true);
        mesh.push_cap(radius, -half, segments, false);
        mesh
    }

    fn push_cap(&mut self, radius: f32, y: f32, segments: u32, top: bool) {
        let normal = if top { Vec3::Y } else { -Vec3::Y };
        let center = self.vertices.len() as u32;
        self.vertices.push(Vertex3D::new(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5)));

        let ring = self.vertices.len() as u32;
        for segment in 0..=segments {
            let (sin, cos) = (segment as f32 / segments as f32 * TAU).sin_cos();
            self.vertices.push(Vertex3D::new(
                Vec3::new(radius * sin, y, radius * cos),
                normal,
                Vec2::new(sin * 0.5 + 0.5, cos * 0.5 + 0.5),
            ));
        }

        for segment in 0..segments {
            let (a, b) = (ring + segment, ring + segment + 1);
            if top {
                self.indices.extend_from_slice(&[center, a, b]);
            } else {
                self.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    /// Flat disc in the XY plane facing +Z
    pub fn create_disc(radius: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut mesh = Self::new("Disc");
        mesh.vertices.push(Vertex3D::new(Vec3::ZERO, Vec3::Z, Vec2::splat(0.5)));

        for segment in 0..=segments {
            let (sin, cos) = (segment as f32 / segments as f32 * TAU).sin_cos();
            mesh.vertices.push(Vertex3D::new(
                Vec3::new(radius * cos, radius * sin, 0.0),
                Vec3::Z,
                Vec2::new(cos * 0.5 + 0.5, sin * 0.5 + 0.5),
            ));
        }

        for segment in 1..=segments {
            mesh.indices.extend_from_slice(&[0, segment, segment + 1]);
        }
        mesh
    }

    /// Torus lying in the XY plane around the Z axis
    pub fn create_torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial = radial_segments.max(3);
        let tubular = tubular_segments.max(3);
        let mut mesh = Self::new("Torus");

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let ring = radius + tube * v.cos();
                let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
                let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                mesh.vertices.push(Vertex3D::new(
                    position,
                    (position - center).normalize_or_zero(),
                    Vec2::new(i as f32 / tubular as f32, j as f32 / radial as f32),
                ));
            }
        }

        let stride = tubular + 1;
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        mesh
    }

    /// Open tube swept along a curve, with rings spaced evenly by arc length
    pub fn create_tube(curve: &CatmullRomCurve, tubular_segments: u32, radius: f32, radial_segments: u32) -> Self {
        let tubular = tubular_segments.max(1);
        let radial = radial_segments.max(3);
        let mut mesh = Self::new("Tube");

        for (i, (_, normal, binormal)) in curve.frames(tubular).into_iter().enumerate() {
            let t = i as f32 / tubular as f32;
            let center = curve.point_at_u(t);
            for j in 0..=radial {
                let (sin, cos) = (j as f32 / radial as f32 * TAU).sin_cos();
                let direction = (-cos * normal + sin * binormal).normalize_or_zero();
                mesh.vertices.push(Vertex3D::new(
                    center + direction * radius,
                    direction,
                    Vec2::new(t, j as f32 / radial as f32),
                ));
            }
        }

        let stride = radial + 1;
        for j in 1..=tubular {
            for i in 1..=radial {
                let a = stride * (j - 1) + (i - 1);
                let b = stride * j + (i - 1);
                let c = stride * j + i;
                let d = stride * (j - 1) + i;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_extents() {
        let mesh = Mesh3D::create_box(1.2, 0.05, 1.2);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let (min, max) = mesh.bounding_box();
        assert!((max - min - Vec3::new(1.2, 0.05, 1.2)).length() < 1e-6);
        assert!((max + min).length() < 1e-6);
    }

    #[test]
    fn test_cylinder_counts() {
        let mesh = Mesh3D::create_cylinder(0.12, 0.02, 16);
        // two side rings + two caps (centre + ring each)
        assert_eq!(mesh.vertices.len(), 2 * 17 + 2 * 18);
        assert_eq!(mesh.triangle_count(), 16 * 2 + 16 * 2);
        let (min, max) = mesh.bounding_box();
        assert!((max.y - 0.01).abs() < 1e-6);
        assert!((min.y + 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_torus_normals_are_unit() {
        let mesh = Mesh3D::create_torus(0.1, 0.005, 8, 16);
        assert_eq!(mesh.vertices.len(), 9 * 17);
        assert_eq!(mesh.triangle_count(), 8 * 16 * 2);
        for vertex in &mesh.vertices {
            assert!((vertex.normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_disc_faces_forward() {
        let mesh = Mesh3D::create_disc(0.1, 32);
        assert_eq!(mesh.triangle_count(), 32);
        let tri = &mesh.indices[0..3];
        let a = mesh.vertices[tri[0] as usize].position;
        let b = mesh.vertices[tri[1] as usize].position;
        let c = mesh.vertices[tri[2] as usize].position;
        assert!((b - a).cross(c - a).z > 0.0);
    }

    #[test]
    fn test_tube_follows_curve() {
        let curve = CatmullRomCurve::new(vec![
            Vec3::new(0.0, 0.2, -0.4),
            Vec3::new(0.3, 0.3, -0.2),
            Vec3::new(0.4, 0.6, -0.4),
        ]);
        let mesh = Mesh3D::create_tube(&curve, 20, 0.02, 8);
        assert_eq!(mesh.vertices.len(), 21 * 9);
        assert_eq!(mesh.triangle_count(), 20 * 8 * 2);

        // Every ring sits one radius away from its curve sample
        for (i, ring) in mesh.vertices.chunks(9).enumerate() {
            let center = curve.point_at_u(i as f32 / 20.0);
            for vertex in ring {
                assert!((vertex.position.distance(center) - 0.02).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_tube_rings_are_evenly_spaced() {
        let curve = CatmullRomCurve::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 3.0, 0.0),
        ]);
        let mesh = Mesh3D::create_tube(&curve, 40, 0.05, 8);

        let centers: Vec<Vec3> = mesh
            .vertices
            .chunks(9)
            .map(|ring| ring[..8].iter().map(|v| v.position).sum::<Vec3>() / 8.0)
            .collect();
        let gaps: Vec<f32> = centers.windows(2).map(|pair| pair[0].distance(pair[1])).collect();
        let mean = gaps.iter().sum::<f32>() / gaps.len() as f32;
        for gap in gaps {
            assert!((gap / mean - 1.0).abs() < 0.1, "gap {} vs mean {}", gap, mean);
        }
    }
}
