//! Runtime tuning parameters.
//!
//! Constants that never change live in `constants.rs`; the values here are
//! grouped into structs so a frontend can override them (e.g. gesture
//! thresholds tuned for a different landmark detector).

use crate::constants::*;
use glam::Vec3;

/// Thresholds for hand-pose classification, in normalized landmark units.
///
/// The defaults are empirical and match MediaPipe's hand landmarker output,
/// where coordinates are normalized to the video frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// Average wrist→fingertip distance below which the hand is a fist.
    pub fist_threshold: f32,
    /// Average wrist→fingertip distance above which the hand is open.
    pub open_threshold: f32,
    /// Thumb-tip→index-tip distance below which the two are pinched.
    pub pinch_threshold: f32,
    /// Middle-tip→wrist distance above which the middle finger counts as extended.
    pub extended_threshold: f32,
    /// Minimum time between two blossom toggles fired by the OK gesture.
    pub cooldown_ms: f64,
    /// Exponential smoothing factor applied per tick to the rotation speed.
    pub smoothing: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            fist_threshold: 0.25,
            open_threshold: 0.35,
            pinch_threshold: 0.06,
            extended_threshold: 0.3,
            cooldown_ms: 1000.0,
            smoothing: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationParams {
    pub blossom_step: f32,
    pub camera_step: f32,
    pub focus_distance: f32,
    pub touch_delay_ms: f64,
    pub base_speed: f32,
    pub fast_speed: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            blossom_step: BLOSSOM_STEP,
            camera_step: CAMERA_STEP,
            focus_distance: FOCUS_DISTANCE,
            touch_delay_ms: TOUCH_DELAY_MS,
            base_speed: BASE_SPEED,
            fast_speed: FAST_SPEED,
        }
    }
}

/// Coarse device class used to scale workload and framing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceProfile {
    Desktop,
    Mobile,
}

const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

impl DeviceProfile {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if MOBILE_MARKERS.iter().any(|m| ua.contains(m)) {
            DeviceProfile::Mobile
        } else {
            DeviceProfile::Desktop
        }
    }

    pub fn snow_particle_count(self) -> usize {
        match self {
            DeviceProfile::Desktop => 1500,
            DeviceProfile::Mobile => 500,
        }
    }

    /// Initial (and "home") camera eye; mobile sits further back to fit a narrow viewport.
    pub fn initial_camera_eye(self) -> Vec3 {
        match self {
            DeviceProfile::Desktop => Vec3::new(0.0, 12.0, 35.0),
            DeviceProfile::Mobile => Vec3::new(0.0, 10.0, 45.0),
        }
    }

    pub fn max_pixel_ratio(self) -> f64 {
        match self {
            DeviceProfile::Desktop => 2.0,
            DeviceProfile::Mobile => 1.5,
        }
    }

    pub fn webcam_width(self) -> u32 {
        match self {
            DeviceProfile::Desktop => 640,
            DeviceProfile::Mobile => 320,
        }
    }
}
