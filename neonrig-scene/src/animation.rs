// Per-frame motion of the rig

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use web_time::Instant;

use crate::error::Result;
use crate::interaction::PointerSample;
use crate::rig::{Rig, RigHandles};
use crate::three_d::Scene3D;
use crate::viewport::{handle_resize, RenderSurface, Viewport};

/// Constants driving the per-frame update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionTuning {
    /// Height of the idle bob, in world units
    #[serde(default = "default_bob_amplitude")]
    pub bob_amplitude: f32,
    /// Angular frequency of the bob, radians per second
    #[serde(default = "default_bob_frequency")]
    pub bob_frequency: f32,
    /// Radians of tilt per CSS pixel of pointer offset
    #[serde(default = "default_pointer_sensitivity")]
    pub pointer_sensitivity: f32,
    /// Fraction of the remaining distance covered each frame
    #[serde(default = "default_damping")]
    pub damping: f32,
    /// Fan rotation per frame, radians
    #[serde(default = "default_fan_speed")]
    pub fan_speed: f32,
    /// Auto-rotation per frame while the pointer is elsewhere, radians
    #[serde(default = "default_auto_rotate_speed")]
    pub auto_rotate_speed: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            bob_amplitude: default_bob_amplitude(),
            bob_frequency: default_bob_frequency(),
            pointer_sensitivity: default_pointer_sensitivity(),
            damping: default_damping(),
            fan_speed: default_fan_speed(),
            auto_rotate_speed: default_auto_rotate_speed(),
        }
    }
}

fn default_bob_amplitude() -> f32 { 0.05 }
fn default_bob_frequency() -> f32 { 1.0 }
fn default_pointer_sensitivity() -> f32 { 0.001 }
fn default_damping() -> f32 { 0.05 }
fn default_fan_speed() -> f32 { 0.1 }
fn default_auto_rotate_speed() -> f32 { 0.005 }

/// Where the rotation target comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Spin slowly about Y on its own
    #[default]
    AutoRotate,
    /// Tilt toward the pointer
    FollowPointer,
}

/// Everything the loop carries from one frame to the next
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    /// Current tilt: `x` about the X axis, `y` about the Y axis
    pub rotation: Vec2,
    /// Auto-rotation accumulator
    pub auto_angle: f32,
    /// Shared angle of every fan group
    pub fan_angle: f32,
    /// Vertical bob offset applied to the root
    pub bob: f32,
    /// Mode used for the last frame
    pub mode: RotationMode,
    /// Frames stepped so far
    pub frame: u64,
}

/// Vertical bob at `elapsed_secs`
pub fn bob_offset(elapsed_secs: f64, tuning: &MotionTuning) -> f32 {
    tuning.bob_amplitude * (elapsed_secs * tuning.bob_frequency as f64).sin() as f32
}

/// Tilt that points the rig at a pointer `offset` from the window centre.
/// Horizontal movement turns about Y, vertical movement about X.
pub fn pointer_target(offset: Vec2, sensitivity: f32) -> Vec2 {
    Vec2::new(offset.y * sensitivity, offset.x * sensitivity)
}

/// One exponential smoothing step
pub fn smooth(current: Vec2, target: Vec2, damping: f32) -> Vec2 {
    current + damping * (target - current)
}

/// Wrap an angle into `(-PI, PI]`
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Advance the animation by one frame
pub fn step(state: AnimationState, elapsed_secs: f64, pointer: PointerSample, tuning: &MotionTuning) -> AnimationState {
    let mode = if pointer.engaged {
        RotationMode::FollowPointer
    } else {
        RotationMode::AutoRotate
    };

    let mut rotation = state.rotation;
    let mut auto_angle = state.auto_angle;
    if mode != state.mode {
        match mode {
            // Return to the pointer by the short way round
            RotationMode::FollowPointer => rotation.y = wrap_angle(rotation.y),
            // Carry on spinning from wherever the rig is facing
            RotationMode::AutoRotate => auto_angle = rotation.y,
        }
    }

    let target = match mode {
        RotationMode::FollowPointer => pointer_target(pointer.offset, tuning.pointer_sensitivity),
        RotationMode::AutoRotate => {
            auto_angle += tuning.auto_rotate_speed;
            // Shift target and current together so their gap is unchanged
            if auto_angle > TAU {
                auto_angle -= TAU;
                rotation.y -= TAU;
            } else if auto_angle < -TAU {
                auto_angle += TAU;
                rotation.y += TAU;
            }
            Vec2::new(0.0, auto_angle)
        }
    };

    AnimationState {
        rotation: smooth(rotation, target, tuning.damping),
        auto_angle,
        fan_angle: (state.fan_angle + tuning.fan_speed).rem_euclid(TAU),
        bob: bob_offset(elapsed_secs, tuning),
        mode,
        frame: state.frame + 1,
    }
}

/// Write a state into the scene transforms
pub fn apply(state: &AnimationState, scene: &mut Scene3D, handles: &RigHandles) {
    if let Some(root) = scene.node_mut(handles.root) {
        root.position.y = state.bob;
        root.rotation = Vec3::new(state.rotation.x, state.rotation.y, 0.0);
    }

    for &fan in &handles.fans {
        if let Some(node) = scene.node_mut(fan) {
            node.rotation.y = state.fan_angle;
        }
    }
}

/// Seconds since the loop started
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    /// Start counting now
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Seconds elapsed since [`FrameClock::start`]
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Owns the rig and its animation state; driven once per display refresh
pub struct AnimationLoop {
    rig: Rig,
    state: AnimationState,
    tuning: MotionTuning,
}

impl AnimationLoop {
    /// Wrap a freshly built rig
    pub fn new(rig: Rig, tuning: MotionTuning) -> Self {
        Self {
            rig,
            state: AnimationState::default(),
            tuning,
        }
    }

    /// Step, pose and draw one frame
    pub fn tick<S: RenderSurface + ?Sized>(
        &mut self,
        elapsed_secs: f64,
        pointer: PointerSample,
        surface: &mut S,
    ) -> Result<()> {
        self.state = step(self.state, elapsed_secs, pointer, &self.tuning);
        apply(&self.state, &mut self.rig.scene, &self.rig.handles);
        surface.render(&self.rig.scene)
    }

    /// Container changed size
    pub fn resize<S: RenderSurface + ?Sized>(&mut self, surface: &mut S, viewport: Viewport) {
        handle_resize(&mut self.rig.scene, surface, viewport);
    }

    /// Latest state
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// The rig being animated
    pub fn rig(&self) -> &Rig {
        &self.rig
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engaged(x: f32, y: f32) -> PointerSample {
        PointerSample {
            offset: Vec2::new(x, y),
            engaged: true,
        }
    }

    #[test]
    fn test_pointer_target_is_linear() {
        let s = 0.001;
        let a = pointer_target(Vec2::new(120.0, -40.0), s);
        let b = pointer_target(Vec2::new(240.0, -80.0), s);
        assert_eq!(b, a * 2.0);
        assert_eq!(a, Vec2::new(-40.0 * s, 120.0 * s));
        assert_eq!(pointer_target(Vec2::ZERO, s), Vec2::ZERO);
    }

    #[test]
    fn test_smoothing_fixed_point() {
        let current = Vec2::new(0.3, -0.7);
        assert_eq!(smooth(current, current, 0.05), current);
    }

    #[test]
    fn test_smoothing_moves_a_fraction() {
        let next = smooth(Vec2::ZERO, Vec2::new(1.0, -2.0), 0.05);
        assert_eq!(next, Vec2::new(0.05, -0.1));
    }

    #[test]
    fn test_bob_follows_sine() {
        let tuning = MotionTuning::default();
        assert_eq!(bob_offset(0.0, &tuning), 0.0);
        let quarter = std::f64::consts::FRAC_PI_2;
        assert!((bob_offset(quarter, &tuning) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_fans_advance_by_fixed_increment() {
        let tuning = MotionTuning::default();
        let mut state = AnimationState::default();
        for _ in 0..10 {
            state = step(state, 0.0, PointerSample::default(), &tuning);
        }
        assert!((state.fan_angle - 1.0).abs() < 1e-5);
        assert_eq!(state.frame, 10);
    }

    #[test]
    fn test_fan_angle_wraps() {
        let tuning = MotionTuning::default();
        let state = AnimationState {
            fan_angle: TAU - 0.05,
            ..Default::default()
        };
        let next = step(state, 0.0, PointerSample::default(), &tuning);
        assert!((next.fan_angle - 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_follow_mode_converges_on_target() {
        let tuning = MotionTuning::default();
        let pointer = engaged(200.0, 100.0);
        let mut state = AnimationState::default();
        for _ in 0..400 {
            state = step(state, 0.0, pointer, &tuning);
        }
        assert_eq!(state.mode, RotationMode::FollowPointer);
        assert!((state.rotation - Vec2::new(0.1, 0.2)).length() < 1e-4);
    }

    #[test]
    fn test_auto_rotate_advances_accumulator() {
        let tuning = MotionTuning::default();
        let state = step(AnimationState::default(), 0.0, PointerSample::default(), &tuning);
        assert_eq!(state.mode, RotationMode::AutoRotate);
        assert_eq!(state.auto_angle, tuning.auto_rotate_speed);
        assert!((state.rotation.y - tuning.damping * tuning.auto_rotate_speed).abs() < 1e-9);
        assert_eq!(state.rotation.x, 0.0);
    }

    #[test]
    fn test_entering_auto_mode_seeds_from_current_yaw() {
        let tuning = MotionTuning::default();
        let state = AnimationState {
            rotation: Vec2::new(0.1, 0.4),
            mode: RotationMode::FollowPointer,
            ..Default::default()
        };
        let next = step(state, 0.0, PointerSample::default(), &tuning);
        assert!((next.auto_angle - (0.4 + tuning.auto_rotate_speed)).abs() < 1e-6);
    }

    #[test]
    fn test_entering_follow_mode_takes_short_path() {
        let tuning = MotionTuning::default();
        let state = AnimationState {
            rotation: Vec2::new(0.0, TAU - 0.1),
            mode: RotationMode::AutoRotate,
            ..Default::default()
        };
        let next = step(state, 0.0, engaged(0.0, 0.0), &tuning);
        assert!(next.rotation.y < 0.0 && next.rotation.y > -0.1);
    }

    #[test]
    fn test_reverse_auto_rotation_stays_bounded() {
        let tuning = MotionTuning {
            auto_rotate_speed: -0.005,
            ..Default::default()
        };
        let start = AnimationState {
            rotation: Vec2::new(0.0, -TAU + 0.003),
            auto_angle: -TAU + 0.001,
            ..Default::default()
        };

        let next = step(start, 0.0, PointerSample::default(), &tuning);
        assert!((next.auto_angle - -0.004).abs() < 1e-5);
        // Same smoothing step as without the wrap, shifted by a full turn
        let unwrapped = smooth(start.rotation, Vec2::new(0.0, -TAU - 0.004), tuning.damping);
        assert!((next.rotation.y - (unwrapped.y + TAU)).abs() < 1e-5);

        let mut state = AnimationState::default();
        for _ in 0..5000 {
            state = step(state, 0.0, PointerSample::default(), &tuning);
            assert!(state.auto_angle.abs() <= TAU);
            assert!(state.rotation.y.abs() <= 2.0 * TAU);
        }
    }

    #[test]
    fn test_wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-0.5) + 0.5).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
    }
}
