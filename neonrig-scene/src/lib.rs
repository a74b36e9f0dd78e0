//! NeonRig Scene - procedural PC showcase rendered with WebGL2
//!
//! Builds a glass-walled PC case with RAM, a GPU with spinning fans, a CPU block and a
//! coolant tube, lights it with neon accents, and animates it each display refresh.
//! Everything except [`webgl_renderer`] and [`web`] is platform-independent and runs in
//! native tests.

#![warn(missing_docs)]

pub mod animation;
pub mod config;
pub mod error;
pub mod interaction;
pub mod palette;
pub mod primitives;
pub mod rig;
pub mod three_d;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub mod webgl_renderer;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animation::{AnimationLoop, AnimationState, FrameClock, MotionTuning, RotationMode};
pub use config::{CameraConfig, SceneConfig};
pub use error::{Result, SceneError};
pub use interaction::{InteractionTracker, PointerSample, TrackingZone};
pub use primitives::Color;
pub use rig::{Rig, RigHandles};
pub use three_d::{Camera3D, Light, Material3D, Mesh3D, Scene3D};
pub use viewport::{handle_resize, RenderSurface, Viewport};
