//! 3D scene support: camera, lighting, meshes, materials and the scene graph

pub mod camera;
pub mod curve;
pub mod lighting;
pub mod mesh;
pub mod material;
pub mod scene3d;

pub use camera::Camera3D;
pub use curve::CatmullRomCurve;
pub use lighting::{Light, LightType};
pub use mesh::{Mesh3D, Vertex3D};
pub use material::Material3D;
pub use scene3d::{DrawItem, Scene3D, Node3D};
