
use glam::{Vec2, Vec3};
use neonrig_scene::animation::{AnimationLoop, MotionTuning, RotationMode};
use neonrig_scene::config::SceneConfig;
use neonrig_scene::error::SceneError;
use neonrig_scene::interaction::{InteractionTracker, PointerSample, TrackingZone};
use neonrig_scene::rig;
use neonrig_scene::viewport::{RenderSurface, Viewport};
use test_helpers::{approx_equal, RecordingSurface};

fn start() -> (AnimationLoop, RecordingSurface) {
    let viewport = Viewport::new(800, 600, 1.0);
    let rig = rig::build(viewport, &SceneConfig::default()).unwrap();
    (AnimationLoop::new(rig, MotionTuning::default()), RecordingSurface::new(viewport))
}

#[test]
fn test_resize_updates_camera_and_surface() {
    let (mut animation, mut surface) = start();
    let resized = Viewport::new(1024, 512, 2.0);

    animation.resize(&mut surface, resized);

    assert_eq!(animation.rig().scene.camera.aspect_ratio, 1024.0 / 512.0);
    assert_eq!(surface.size(), resized);
    assert_eq!(surface.size().drawing_buffer_size(), (2048, 1024));
}

#[test]
fn test_zero_height_resize_keeps_aspect() {
    let (mut animation, mut surface) = start();
    let before = animation.rig().scene.camera.aspect_ratio;

    animation.resize(&mut surface, Viewport::new(640, 0, 1.0));

    assert_eq!(animation.rig().scene.camera.aspect_ratio, before);
    assert_eq!(surface.resizes.len(), 1);
}

#[test]
fn test_tick_renders_and_poses_the_rig() {
    let (mut animation, mut surface) = start();

    for frame in 0..3 {
        animation
            .tick(frame as f64 * 0.5, PointerSample::default(), &mut surface)
            .unwrap();
    }

    assert_eq!(surface.frames, 3);
    let state = *animation.state();
    assert_eq!(state.frame, 3);

    let scene = &animation.rig().scene;
    let root = scene.node(animation.rig().handles.root).unwrap();
    assert_eq!(root.position.y, state.bob);
    assert!(approx_equal(state.bob, 0.05 * 1.0f32.sin(), 1e-6));

    for &fan in &animation.rig().handles.fans {
        assert_eq!(scene.node(fan).unwrap().rotation.y, state.fan_angle);
    }
}

#[test]
fn test_surface_sees_the_posed_scene() {
    let (mut animation, mut surface) = start();
    animation.tick(0.0, PointerSample::default(), &mut surface).unwrap();

    let state = animation.state();
    assert_eq!(
        surface.last_root_rotation,
        Some(Vec3::new(state.rotation.x, state.rotation.y, 0.0))
    );
}

#[test]
fn test_render_failure_propagates() {
    let viewport = Viewport::new(800, 600, 1.0);
    let rig = rig::build(viewport, &SceneConfig::default()).unwrap();
    let mut animation = AnimationLoop::new(rig, MotionTuning::default());
    let mut surface = RecordingSurface::failing(viewport);

    let result = animation.tick(0.0, PointerSample::default(), &mut surface);

    assert!(matches!(result, Err(SceneError::Graphics(_))));
}

#[test]
fn test_pointer_in_zone_tilts_the_rig() {
    let (mut animation, mut surface) = start();
    let mut tracker = InteractionTracker::new(TrackingZone::RightHalf, 1000.0, 800.0);
    tracker.pointer_moved(900.0, 600.0);

    for frame in 0..300 {
        animation.tick(frame as f64 / 60.0, tracker.sample(), &mut surface).unwrap();
    }

    let state = animation.state();
    assert_eq!(state.mode, RotationMode::FollowPointer);
    // offset (400, 200) at 0.001 rad per pixel
    assert!((state.rotation - Vec2::new(0.2, 0.4)).length() < 1e-3);
}

#[test]
fn test_pointer_outside_zone_keeps_auto_rotating() {
    let (mut animation, mut surface) = start();
    let mut tracker = InteractionTracker::new(TrackingZone::RightHalf, 1000.0, 800.0);
    tracker.pointer_moved(100.0, 100.0);

    let mut last_yaw = 0.0;
    for frame in 0..20 {
        animation.tick(frame as f64 / 60.0, tracker.sample(), &mut surface).unwrap();
        let yaw = animation.state().rotation.y;
        assert!(yaw > last_yaw);
        last_yaw = yaw;
    }
    assert_eq!(animation.state().mode, RotationMode::AutoRotate);
    assert_eq!(animation.state().rotation.x, 0.0);
}

#[test]
fn test_fan_spin_moves_blades_in_world_space() {
    let (mut animation, mut surface) = start();
    let blade = animation.rig().scene.index_of("fan_0_blade_0").unwrap();
    let before = animation.rig().scene.world_transform(blade).w_axis;

    animation.tick(0.0, PointerSample::default(), &mut surface).unwrap();

    let after = animation.rig().scene.world_transform(blade).w_axis;
    assert!((after - before).length() > 1e-4);
}
