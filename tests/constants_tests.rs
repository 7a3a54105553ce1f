// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use xmas_core::constants as tuning;

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_are_positive() {
    assert!(LOADING_FADE_DELAY_MS > 0);
    assert!(LOADING_REMOVE_DELAY_MS > 0);
    assert!(tuning::TOUCH_DELAY_MS > 0.0);
    assert!(CLICK_SLOP_PX > 0.0);
    assert!(WHEEL_STEP_PX > 0.0);
    assert!(PINCH_STEP_PX > 0.0);
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        LOADING_ID,
        UI_PANEL_ID,
        MUSIC_BUTTON_ID,
        MUSIC_AUDIO_ID,
        MUSIC_INPUT_ID,
        PHOTO_INPUT_ID,
        CAM_BUTTON_ID,
        WEBCAM_ID,
        THEME_INPUT_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b, "duplicate element id");
        }
    }
    assert!(TITLE_SELECTOR.starts_with(&format!("#{}", UI_PANEL_ID)));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ui_opacity_levels() {
    assert!(tuning::UI_DIMMED_OPACITY > 0.0);
    assert!(tuning::UI_DIMMED_OPACITY < UI_FULL_OPACITY);
    assert!(UI_FULL_OPACITY <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn animation_constants_relationships() {
    // One blossom cycle is a whole number of steps
    let steps = (1.0 / tuning::BLOSSOM_STEP).round();
    assert!((steps * tuning::BLOSSOM_STEP - 1.0).abs() < 1e-6);

    assert!(tuning::FAST_SPEED > tuning::BASE_SPEED);
    assert!(tuning::CAMERA_STEP > 0.0 && tuning::CAMERA_STEP < 1.0);
    assert!(tuning::FLICKER_FLOOR > 0.0);
    assert!(tuning::BULB_BASE_INTENSITY - tuning::FLICKER_AMPLITUDE >= tuning::FLICKER_FLOOR);

    assert!(tuning::SNOW_RESPAWN_MAX_Y < tuning::SNOW_CEILING);
    assert!(tuning::ORBIT_MIN_DISTANCE < tuning::ORBIT_MAX_DISTANCE);
    assert!(tuning::CAMERA_NEAR < tuning::FOCUS_DISTANCE);
}
