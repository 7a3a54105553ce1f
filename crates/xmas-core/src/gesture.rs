//! Hand-gesture interpretation.
//!
//! Consumes one landmark sample per new video frame and turns it into a
//! target spin speed (fist = fast, open hand = stop, relaxed = base) and a
//! debounced "toggle blossom" command fired by the OK sign.
//!
//! Landmark indices follow the 21-point hand model used by MediaPipe:
//! 0 wrist, 4 thumb tip, 8 index tip, 12 middle tip, 16 ring tip, 20 pinky tip.

use crate::blossom::BlossomState;
use crate::config::GestureConfig;
use crate::state::RotationState;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

const FINGER_TIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// One detected hand: 21 normalized points (x, y in frame units, z relative depth).
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: SmallVec<[Vec3; LANDMARK_COUNT]>,
}

impl HandLandmarks {
    /// Returns `None` if fewer than [`LANDMARK_COUNT`] points are supplied.
    pub fn new(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let points: SmallVec<[Vec3; LANDMARK_COUNT]> = points.into_iter().collect();
        (points.len() >= LANDMARK_COUNT).then_some(Self { points })
    }

    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    /// Planar (x, y) distance between two landmarks; depth is too noisy to use.
    pub fn planar_distance(&self, a: usize, b: usize) -> f32 {
        let pa = self.points[a];
        let pb = self.points[b];
        Vec2::new(pa.x - pb.x, pa.y - pb.y).length()
    }
}

/// Detector output for one video frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSample {
    /// Playback position of the video frame the landmarks came from (seconds).
    pub video_time: f64,
    /// Wall clock at detection time (milliseconds).
    pub now_ms: f64,
    pub hands: Vec<HandLandmarks>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandPose {
    Fist,
    Relaxed,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub pose: HandPose,
    pub ok_sign: bool,
    pub avg_tip_distance: f32,
}

pub fn classify(hand: &HandLandmarks, config: &GestureConfig) -> Classification {
    let avg = FINGER_TIPS
        .iter()
        .map(|&tip| hand.planar_distance(tip, WRIST))
        .sum::<f32>()
        / FINGER_TIPS.len() as f32;
    let pose = if avg < config.fist_threshold {
        HandPose::Fist
    } else if avg > config.open_threshold {
        HandPose::Open
    } else {
        HandPose::Relaxed
    };
    let pinch = hand.planar_distance(THUMB_TIP, INDEX_TIP);
    let middle_reach = hand.planar_distance(MIDDLE_TIP, WRIST);
    Classification {
        pose,
        ok_sign: pinch < config.pinch_threshold && middle_reach > config.extended_threshold,
        avg_tip_distance: avg,
    }
}

/// What one processed sample asks of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureOutput {
    /// `None` when input is being ignored (an ornament is focused).
    pub target_speed: Option<f32>,
    pub toggle_blossom: bool,
}

#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    config: GestureConfig,
    last_video_time: Option<f64>,
    last_fire_ms: Option<f64>,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            last_video_time: None,
            last_fire_ms: None,
        }
    }

    /// False if `video_time` is the frame processed last; lets the caller
    /// skip running the detector on a frame that would be discarded anyway.
    pub fn is_new_frame(&self, video_time: f64) -> bool {
        self.last_video_time != Some(video_time)
    }

    /// Classify a sample. Returns `None` for a frame that was already
    /// processed (same video time), in which case nothing changes.
    pub fn process(
        &mut self,
        sample: &GestureSample,
        focused: bool,
        rotation: &RotationState,
    ) -> Option<GestureOutput> {
        if !self.is_new_frame(sample.video_time) {
            return None;
        }
        self.last_video_time = Some(sample.video_time);

        let mut target_speed = rotation.base_speed();
        let mut ok_sign = false;
        if !focused {
            if let Some(hand) = sample.hands.first() {
                let c = classify(hand, &self.config);
                target_speed = match c.pose {
                    HandPose::Fist => rotation.fast_speed(),
                    HandPose::Open => 0.0,
                    HandPose::Relaxed => rotation.base_speed(),
                };
                ok_sign = c.ok_sign;
            }
        }

        let toggle_blossom = self.debounce(ok_sign, sample.now_ms);
        if toggle_blossom {
            log::info!("[gesture] OK sign -> toggle blossom");
        }
        Some(GestureOutput {
            target_speed: (!focused).then_some(target_speed),
            toggle_blossom,
        })
    }

    fn debounce(&mut self, ok_sign: bool, now_ms: f64) -> bool {
        let cooled = |last: f64| now_ms - last > self.config.cooldown_ms;
        if ok_sign {
            if self.last_fire_ms.map_or(true, cooled) {
                self.last_fire_ms = Some(now_ms);
                return true;
            }
        } else if self.last_fire_ms.is_some_and(cooled) {
            self.last_fire_ms = None;
        }
        false
    }
}

/// Route an interpreter output into the state groups it is allowed to touch.
pub fn apply_gesture(output: &GestureOutput, rotation: &mut RotationState, blossom: &mut BlossomState) {
    if let Some(speed) = output.target_speed {
        rotation.set_target_speed(speed);
    }
    if output.toggle_blossom {
        blossom.toggle();
    }
}
