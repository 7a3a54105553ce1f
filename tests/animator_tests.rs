// The per-frame world tick: spin, smoothing, flicker, delayed taps and camera events.

use glam::{Vec2, Vec3};
use rand::{rngs::StdRng, SeedableRng};
use xmas_core::constants::{BASE_SPEED, FAST_SPEED, FLICKER_FLOOR, STAR_BLOSSOM_RISE, STAR_Y};
use xmas_core::*;

fn world(seed: u64) -> World {
    World::new(
        DeviceProfile::Desktop,
        &AnimationParams::default(),
        GestureConfig::default(),
        16.0 / 9.0,
        &mut StdRng::seed_from_u64(seed),
    )
}

fn project(camera: &Camera, p: Vec3) -> Vec2 {
    let clip = camera.projection_matrix() * camera.view_matrix() * p.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

#[test]
fn new_world_uses_device_profile() {
    let w = world(1);
    assert_eq!(w.snow.len(), DeviceProfile::Desktop.snow_particle_count());
    assert_eq!(w.camera.eye, DeviceProfile::Desktop.initial_camera_eye());
    assert_eq!(w.state.camera.home().target, Vec3::ZERO);
    assert_eq!(w.state.rotation.speed(), BASE_SPEED);
    assert!(w.orbit.is_enabled());
}

#[test]
fn tree_spins_at_base_speed() {
    let mut w = world(2);
    for i in 0..10 {
        w.tick(i as f32 / 60.0, i as f64 * 16.0);
    }
    assert!((w.state.rotation.angle() - 10.0 * BASE_SPEED).abs() < 1e-5);
    assert!((w.scene.tree_rotation() - w.state.rotation.angle()).abs() < 1e-4);
}

#[test]
fn speed_eases_toward_target() {
    let mut w = world(3);
    w.state.rotation.set_target_speed(FAST_SPEED);
    w.tick(0.0, 0.0);
    let first = w.state.rotation.speed();
    assert!(first > BASE_SPEED && first < FAST_SPEED, "one tick only moves part way");

    for i in 1..200 {
        w.tick(i as f32 / 60.0, i as f64 * 16.0);
    }
    assert!((w.state.rotation.speed() - FAST_SPEED).abs() < 1e-5);
}

#[test]
fn flicker_never_drops_below_floor() {
    for i in 0..1000 {
        let t = i as f32 * 0.013;
        assert!(flicker_intensity(0.0, 1.3, t) >= FLICKER_FLOOR);
        let v = flicker_intensity(0.8, -4.0, t);
        assert!((0.6 - 1e-5..=1.0 + 1e-5).contains(&v));
    }
    assert_eq!(flicker_intensity(0.6, 0.0, 0.0), 0.6);
}

#[test]
fn tick_updates_bulb_intensity() {
    let mut w = world(4);
    w.tick(1.25, 0.0);
    for bulb in &w.scene.bulbs {
        let got = w.scene.node(bulb.node).material.emissive_intensity;
        let want = flicker_intensity(bulb.base_intensity, bulb.phase, 1.25);
        assert!((got - want).abs() < 1e-6);
    }
}

#[test]
fn blossom_pauses_spin_and_poses_star() {
    let mut w = world(5);
    w.tick(0.0, 0.0);
    w.state.blossom.toggle();
    let angle = w.state.rotation.angle();
    for i in 1..=30 {
        w.tick(i as f32 / 60.0, i as f64 * 16.0);
    }
    assert_eq!(w.state.rotation.angle(), angle, "no spin while blossomed");
    assert_eq!(w.state.blossom.progress(), 1.0);
    let star_y = w.scene.node(w.scene.star).transform.translation.y;
    assert!((star_y - (STAR_Y + STAR_BLOSSOM_RISE)).abs() < 1e-4);
}

#[test]
fn touch_tap_is_routed_after_delay() {
    let mut w = world(6);
    let node = w.add_photo(PhotoHandle(0));
    let ndc = project(&w.camera, w.scene.world_position(node));

    assert!(w.touch_start(1, ndc, 1000.0));
    let report = w.tick(0.0, 1050.0);
    assert!(report.taps.is_empty(), "tap is held back");
    assert!(w.state.camera.focused().is_none());

    let report = w.tick(0.016, 1100.0);
    assert_eq!(report.taps.as_slice(), &[TapOutcome::Focused(node)]);
    assert_eq!(w.state.camera.focused(), Some(node));
    assert!(!w.state.is_rotating());
}

#[test]
fn two_finger_touch_is_not_a_tap() {
    let mut w = world(7);
    w.add_photo(PhotoHandle(0));
    assert!(!w.touch_start(2, Vec2::ZERO, 0.0));
    let report = w.tick(0.0, 500.0);
    assert!(report.taps.is_empty());
}

#[test]
fn focus_round_trip_reports_camera_events() {
    let mut w = world(8);
    let node = w.add_photo(PhotoHandle(0));
    let ndc = project(&w.camera, w.scene.world_position(node));
    assert_eq!(w.click(ndc), TapOutcome::Focused(node));

    let mut events = Vec::new();
    for i in 0..40 {
        events.extend(w.tick(i as f32 / 60.0, i as f64 * 16.0).camera_events);
    }
    assert_eq!(events, vec![CameraEvent::FocusCompleted(node)]);
    assert!(!w.orbit.is_enabled());

    assert_eq!(w.click(Vec2::ZERO), TapOutcome::Unfocused);
    events.clear();
    for i in 40..80 {
        events.extend(w.tick(i as f32 / 60.0, i as f64 * 16.0).camera_events);
    }
    assert_eq!(events, vec![CameraEvent::UnfocusCompleted]);
    assert!(w.orbit.is_enabled());
    assert!(w.camera.eye.abs_diff_eq(w.state.camera.home().eye, 1e-3));
    assert!(w.state.is_rotating());
}

#[test]
fn gesture_sample_drives_rotation_target() {
    let mut w = world(9);
    let wrist = Vec3::new(0.5, 0.9, 0.0);
    let mut points = vec![wrist; 21];
    for tip in [8, 12, 16, 20] {
        points[tip] = wrist - Vec3::new(0.0, 0.1, 0.0);
    }
    points[4] = wrist + Vec3::new(0.3, 0.0, 0.0);
    let fist = HandLandmarks::new(points).expect("21 points");

    let out = w.gesture_sample(&GestureSample {
        video_time: 0.5,
        now_ms: 0.0,
        hands: vec![fist],
    });
    assert!(out.is_some());
    assert_eq!(w.state.rotation.target_speed(), FAST_SPEED);
}

#[test]
fn resize_keeps_pose() {
    let mut w = world(10);
    let eye = w.camera.eye;
    w.resize(800.0, 400.0);
    assert_eq!(w.camera.aspect, 2.0);
    assert_eq!(w.camera.eye, eye);
    w.resize(0.0, 400.0);
    assert_eq!(w.camera.aspect, 2.0, "degenerate sizes are ignored");
}
