// Hand-pose classification, OK-sign debounce and how gesture output reaches the scene state.

use glam::Vec3;
use xmas_core::constants::{BASE_SPEED, BLOSSOM_STEP, FAST_SPEED};
use xmas_core::*;

const WRIST_POS: Vec3 = Vec3::new(0.5, 0.9, 0.0);

/// Hand with the four finger tips straight above the wrist at the given
/// distances and the thumb tip at `thumb`.
fn hand(index: f32, middle: f32, ring: f32, pinky: f32, thumb: Vec3) -> HandLandmarks {
    let mut points = vec![WRIST_POS; LANDMARK_COUNT];
    points[INDEX_TIP] = WRIST_POS - Vec3::new(0.0, index, 0.0);
    points[MIDDLE_TIP] = WRIST_POS - Vec3::new(0.05, middle, 0.0);
    points[RING_TIP] = WRIST_POS - Vec3::new(0.1, ring, 0.0);
    points[PINKY_TIP] = WRIST_POS - Vec3::new(0.15, pinky, 0.0);
    points[THUMB_TIP] = thumb;
    HandLandmarks::new(points).expect("21 points")
}

fn far_thumb() -> Vec3 {
    WRIST_POS + Vec3::new(0.2, -0.05, 0.0)
}

fn fist() -> HandLandmarks {
    hand(0.1, 0.1, 0.1, 0.1, far_thumb())
}

fn open_hand() -> HandLandmarks {
    hand(0.5, 0.55, 0.5, 0.45, far_thumb())
}

fn relaxed() -> HandLandmarks {
    hand(0.3, 0.3, 0.3, 0.3, far_thumb())
}

fn ok_sign() -> HandLandmarks {
    let index_tip = WRIST_POS - Vec3::new(0.0, 0.2, 0.0);
    hand(0.2, 0.4, 0.3, 0.3, index_tip + Vec3::new(0.01, 0.0, 0.0))
}

fn sample(video_time: f64, now_ms: f64, hands: Vec<HandLandmarks>) -> GestureSample {
    GestureSample {
        video_time,
        now_ms,
        hands,
    }
}

fn rotation() -> RotationState {
    RotationState::new(BASE_SPEED, FAST_SPEED)
}

#[test]
fn needs_a_full_hand() {
    assert!(HandLandmarks::new(vec![Vec3::ZERO; LANDMARK_COUNT - 1]).is_none());
    assert!(HandLandmarks::new(vec![Vec3::ZERO; LANDMARK_COUNT]).is_some());
}

#[test]
fn classifies_poses() {
    let cfg = GestureConfig::default();
    assert_eq!(classify(&fist(), &cfg).pose, HandPose::Fist);
    assert_eq!(classify(&open_hand(), &cfg).pose, HandPose::Open);
    assert_eq!(classify(&relaxed(), &cfg).pose, HandPose::Relaxed);

    let ok = classify(&ok_sign(), &cfg);
    assert!(ok.ok_sign);
    assert_eq!(ok.pose, HandPose::Relaxed);
    assert!(!classify(&relaxed(), &cfg).ok_sign);
}

#[test]
fn pinch_without_extended_middle_is_not_ok() {
    let cfg = GestureConfig::default();
    let index_tip = WRIST_POS - Vec3::new(0.0, 0.1, 0.0);
    let curled = hand(0.1, 0.1, 0.1, 0.1, index_tip);
    let c = classify(&curled, &cfg);
    assert!(!c.ok_sign);
    assert_eq!(c.pose, HandPose::Fist);
}

#[test]
fn thresholds_come_from_config() {
    let cfg = GestureConfig {
        fist_threshold: 0.05,
        ..GestureConfig::default()
    };
    assert_eq!(classify(&fist(), &cfg).pose, HandPose::Relaxed);
}

#[test]
fn pose_sets_target_speed() {
    let mut g = GestureInterpreter::new(GestureConfig::default());
    let rot = rotation();

    let out = g.process(&sample(0.1, 0.0, vec![fist()]), false, &rot).expect("new frame");
    assert_eq!(out.target_speed, Some(FAST_SPEED));

    let out = g.process(&sample(0.2, 40.0, vec![open_hand()]), false, &rot).expect("new frame");
    assert_eq!(out.target_speed, Some(0.0));

    let out = g.process(&sample(0.3, 80.0, vec![relaxed()]), false, &rot).expect("new frame");
    assert_eq!(out.target_speed, Some(BASE_SPEED));

    let out = g.process(&sample(0.4, 120.0, vec![]), false, &rot).expect("new frame");
    assert_eq!(out.target_speed, Some(BASE_SPEED), "no hand falls back to base speed");
    assert!(!out.toggle_blossom);
}

#[test]
fn only_the_first_hand_counts() {
    let mut g = GestureInterpreter::new(GestureConfig::default());
    let out = g
        .process(&sample(0.1, 0.0, vec![open_hand(), fist()]), false, &rotation())
        .expect("new frame");
    assert_eq!(out.target_speed, Some(0.0));
}

#[test]
fn repeated_video_frame_is_skipped() {
    let mut g = GestureInterpreter::new(GestureConfig::default());
    let rot = rotation();
    assert!(g.is_new_frame(1.0));
    assert!(g.process(&sample(1.0, 0.0, vec![fist()]), false, &rot).is_some());
    assert!(!g.is_new_frame(1.0));
    assert!(g.process(&sample(1.0, 16.0, vec![open_hand()]), false, &rot).is_none());
    assert!(g.process(&sample(1.033, 33.0, vec![open_hand()]), false, &rot).is_some());
}

#[test]
fn ok_sign_fires_once_per_cooldown() {
    let mut g = GestureInterpreter::new(GestureConfig::default());
    let rot = rotation();
    let mut fired = Vec::new();
    // Hold the OK sign for two seconds at ~30 fps
    for i in 0..60 {
        let now = i as f64 * 33.0;
        let out = g
            .process(&sample(i as f64 / 30.0, now, vec![ok_sign()]), false, &rot)
            .expect("new frame");
        if out.toggle_blossom {
            fired.push(now);
        }
    }
    assert_eq!(fired.len(), 2, "fired at {:?}", fired);
    assert_eq!(fired[0], 0.0);
    assert!(fired[1] - fired[0] > 1000.0);
}

#[test]
fn ok_sign_inside_cooldown_is_ignored() {
    let mut g = GestureInterpreter::new(GestureConfig::default());
    let rot = rotation();
    let fire = |g: &mut GestureInterpreter, t: f64, now: f64, h: HandLandmarks| {
        g.process(&sample(t, now, vec![h]), false, &rot)
            .expect("new frame")
            .toggle_blossom
    };
    assert!(fire(&mut g, 0.1, 0.0, ok_sign()));
    assert!(!fire(&mut g, 0.2, 300.0, relaxed()));
    assert!(!fire(&mut g, 0.3, 600.0, ok_sign()), "still cooling down");
    assert!(fire(&mut g, 0.4, 1200.0, ok_sign()));
}

#[test]
fn released_ok_rearms_after_cooldown() {
    let mut g = GestureInterpreter::new(GestureConfig::default());
    let rot = rotation();
    let fire = |g: &mut GestureInterpreter, t: f64, now: f64, h: HandLandmarks| {
        g.process(&sample(t, now, vec![h]), false, &rot)
            .expect("new frame")
            .toggle_blossom
    };
    assert!(fire(&mut g, 0.1, 0.0, ok_sign()));
    assert!(!fire(&mut g, 0.2, 1100.0, relaxed()));
    assert!(fire(&mut g, 0.3, 1150.0, ok_sign()));
}

#[test]
fn focused_ornament_mutes_gestures() {
    let mut g = GestureInterpreter::new(GestureConfig::default());
    let rot = rotation();
    let out = g.process(&sample(0.1, 0.0, vec![fist()]), true, &rot).expect("new frame");
    assert_eq!(out.target_speed, None);

    let out = g.process(&sample(0.2, 2000.0, vec![ok_sign()]), true, &rot).expect("new frame");
    assert!(!out.toggle_blossom);
}

#[test]
fn apply_gesture_routes_output() {
    let mut rot = rotation();
    let mut blossom = BlossomState::new(BLOSSOM_STEP);

    apply_gesture(
        &GestureOutput {
            target_speed: Some(FAST_SPEED),
            toggle_blossom: true,
        },
        &mut rot,
        &mut blossom,
    );
    assert_eq!(rot.target_speed(), FAST_SPEED);
    assert_eq!(rot.speed(), BASE_SPEED, "actual speed only moves on tick");
    assert_eq!(blossom.direction(), 1);

    apply_gesture(
        &GestureOutput {
            target_speed: None,
            toggle_blossom: false,
        },
        &mut rot,
        &mut blossom,
    );
    assert_eq!(rot.target_speed(), FAST_SPEED, "None leaves the target alone");
}
