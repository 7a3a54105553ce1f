// Scripted fly-to / fly-back transitions and their interaction with the orbit controls.

use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};
use xmas_core::constants::{CAMERA_STEP, FOCUS_DISTANCE};
use xmas_core::*;

struct Rig {
    scene: Scene,
    cam_state: CameraState,
    camera: Camera,
    orbit: OrbitControls,
    a: NodeId,
    b: NodeId,
}

fn rig() -> Rig {
    let mut rng = StdRng::seed_from_u64(11);
    let mut scene = Scene::build(&mut rng);
    let a = scene.add_ornament(PhotoHandle(0));
    let b = scene.add_ornament(PhotoHandle(1));
    let eye = DeviceProfile::Desktop.initial_camera_eye();
    let home = CameraPose {
        eye,
        target: Vec3::ZERO,
    };
    Rig {
        scene,
        cam_state: CameraState::new(home, CAMERA_STEP, FOCUS_DISTANCE),
        camera: Camera::new(eye, 16.0 / 9.0),
        orbit: OrbitControls::default(),
        a,
        b,
    }
}

fn run_transition(r: &mut Rig) -> (Option<CameraEvent>, usize) {
    for i in 1..=40 {
        if let Some(ev) = r.cam_state.tick(&mut r.camera, &mut r.orbit) {
            return (Some(ev), i);
        }
    }
    (None, 40)
}

#[test]
fn focus_lands_in_front_of_ornament() {
    let mut r = rig();
    let end = r.cam_state.focus_pose(&r.scene, r.a);

    assert!(r.cam_state.focus(&r.scene, r.a, &r.camera, &mut r.orbit));
    assert!(r.cam_state.is_animating());
    assert!(!r.orbit.is_enabled(), "orbit is disabled for the flight");
    assert_eq!(r.cam_state.focused(), Some(r.a));

    let (ev, ticks) = run_transition(&mut r);
    assert_eq!(ev, Some(CameraEvent::FocusCompleted(r.a)));
    assert!((25..=26).contains(&ticks), "took {} ticks", ticks);
    assert_eq!(r.camera.eye, end.eye, "final pose is assigned exactly");
    assert_eq!(r.orbit.target, end.target);
    assert!(!r.cam_state.is_animating());
    assert!(!r.orbit.is_enabled(), "orbit stays off while focused");

    let ornament_pos = r.scene.world_position(r.a);
    assert!((end.eye.distance(ornament_pos) - FOCUS_DISTANCE).abs() < 1e-3);
    let radial = |p: Vec3| Vec3::new(p.x, 0.0, p.z).length();
    assert!(
        radial(end.eye) > radial(ornament_pos),
        "camera should end up outside the tree, facing the photo"
    );
}

#[test]
fn transition_moves_monotonically() {
    let mut r = rig();
    let end = r.cam_state.focus_pose(&r.scene, r.a);
    r.cam_state.focus(&r.scene, r.a, &r.camera, &mut r.orbit);

    let mut last = r.camera.eye.distance(end.eye);
    while r.cam_state.is_animating() {
        r.cam_state.tick(&mut r.camera, &mut r.orbit);
        let d = r.camera.eye.distance(end.eye);
        assert!(d <= last + 1e-4, "distance grew from {} to {}", last, d);
        last = d;
    }
}

#[test]
fn focus_while_animating_is_ignored() {
    let mut r = rig();
    assert!(r.cam_state.focus(&r.scene, r.a, &r.camera, &mut r.orbit));
    r.cam_state.tick(&mut r.camera, &mut r.orbit);

    let before = r.cam_state.transition().cloned();
    assert!(!r.cam_state.focus(&r.scene, r.b, &r.camera, &mut r.orbit));
    assert_eq!(r.cam_state.focused(), Some(r.a), "first target wins");
    assert_eq!(r.cam_state.transition().cloned(), before);

    assert!(!r.cam_state.unfocus(&r.camera, &r.orbit));
    assert_eq!(r.cam_state.focused(), Some(r.a));

    let (ev, _) = run_transition(&mut r);
    assert_eq!(ev, Some(CameraEvent::FocusCompleted(r.a)));
}

#[test]
fn unfocus_returns_home_and_restores_orbit() {
    let mut r = rig();
    let home = r.cam_state.home();
    r.cam_state.focus(&r.scene, r.a, &r.camera, &mut r.orbit);
    run_transition(&mut r);

    assert!(r.cam_state.unfocus(&r.camera, &r.orbit));
    assert_eq!(r.cam_state.focused(), None, "focus clears immediately");
    assert!(!r.orbit.is_enabled());

    let (ev, _) = run_transition(&mut r);
    assert_eq!(ev, Some(CameraEvent::UnfocusCompleted));
    assert_eq!(r.camera.eye, home.eye);
    assert_eq!(r.orbit.target, home.target);
    assert!(r.orbit.is_enabled());
}

#[test]
fn tick_without_transition_is_noop() {
    let mut r = rig();
    let eye = r.camera.eye;
    assert_eq!(r.cam_state.tick(&mut r.camera, &mut r.orbit), None);
    assert_eq!(r.camera.eye, eye);
}

#[test]
fn orbit_ignores_input_while_disabled() {
    let mut camera = Camera::new(Vec3::new(0.0, 12.0, 35.0), 1.0);
    let mut orbit = OrbitControls::default();
    orbit.set_enabled(false);
    orbit.rotate(glam::Vec2::new(200.0, 0.0), 800.0);
    orbit.zoom(3.0);
    orbit.update(&mut camera);
    assert_eq!(camera.eye, Vec3::new(0.0, 12.0, 35.0));
}

#[test]
fn orbit_respects_distance_limits() {
    let mut camera = Camera::new(Vec3::new(0.0, 12.0, 35.0), 1.0);
    let mut orbit = OrbitControls::default();
    for _ in 0..200 {
        orbit.zoom(3.0);
        orbit.update(&mut camera);
    }
    let d = camera.eye.distance(orbit.target);
    assert!(d <= 80.0 + 1e-3, "zoomed out to {}", d);

    for _ in 0..400 {
        orbit.zoom(-3.0);
        orbit.update(&mut camera);
    }
    let d = camera.eye.distance(orbit.target);
    assert!(d >= 5.0 - 1e-3, "zoomed in to {}", d);
    assert!(camera.eye.y > 0.0, "camera stays above the ground");
}

#[test]
fn fractional_zoom_steps_scale_proportionally() {
    let start = Vec3::new(0.0, 12.0, 35.0);
    let zoomed = |steps: f32| {
        let mut camera = Camera::new(start, 1.0);
        let mut orbit = OrbitControls::default();
        orbit.zoom(steps);
        orbit.update(&mut camera);
        camera.eye.distance(orbit.target)
    };
    let d0 = start.length();
    let half = zoomed(0.5);
    let full = zoomed(1.0);
    assert!(d0 < half && half < full, "{} < {} < {}", d0, half, full);
    assert!(zoomed(-1.0) < d0, "negative steps move closer");
    assert!((zoomed(f32::NAN) - d0).abs() < 1e-3, "non-finite steps are ignored");
}

#[test]
fn opposite_zoom_steps_cancel() {
    let start = Vec3::new(0.0, 12.0, 35.0);
    let mut camera = Camera::new(start, 1.0);
    let mut orbit = OrbitControls::default();
    orbit.zoom(1.5);
    orbit.zoom(-1.5);
    orbit.update(&mut camera);
    assert!((camera.eye.distance(orbit.target) - start.length()).abs() < 1e-3);
}
