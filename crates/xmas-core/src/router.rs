//! Pointer and touch routing: taps become focus/unfocus requests.
//!
//! Touch starts are not routed immediately. They wait `delay_ms` in a queue
//! that the animator drains each tick, which keeps a tap from fighting with
//! the orbit controls reacting to the same touch.

use crate::orbit::OrbitControls;
use crate::picking::pick_ornament;
use crate::scene::{NodeId, Scene};
use crate::state::{Camera, SceneState};
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapOutcome {
    /// A camera transition is running; the tap was dropped.
    Ignored,
    Unfocused,
    Focused(NodeId),
    /// Nothing pickable under the pointer.
    Missed,
}

/// Route a tap at `ndc` (normalized device coordinates).
pub fn route_tap(
    ndc: Vec2,
    scene: &Scene,
    state: &mut SceneState,
    camera: &Camera,
    orbit: &mut OrbitControls,
) -> TapOutcome {
    if state.camera.is_animating() {
        return TapOutcome::Ignored;
    }
    if state.camera.focused().is_some() {
        state.camera.unfocus(camera, orbit);
        return TapOutcome::Unfocused;
    }
    let (origin, dir) = camera.ray_from_ndc(ndc);
    match pick_ornament(scene, origin, dir) {
        Some(target) => {
            log::info!("[click] ornament node {}", target.0);
            state.camera.focus(scene, target, camera, orbit);
            TapOutcome::Focused(target)
        }
        None => TapOutcome::Missed,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingTap {
    ndc: Vec2,
    due_ms: f64,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionRouter {
    delay_ms: f64,
    pending: SmallVec<[PendingTap; 4]>,
}

impl InteractionRouter {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: SmallVec::new(),
        }
    }

    /// Queue a single-finger touch. Multi-touch (pinch/rotate) is left to the
    /// orbit controls. Returns whether the touch was queued.
    pub fn on_touch_start(&mut self, touch_count: usize, ndc: Vec2, now_ms: f64) -> bool {
        if touch_count != 1 {
            log::debug!("[touch] ignoring {}-finger touch", touch_count);
            return false;
        }
        self.pending.push(PendingTap {
            ndc,
            due_ms: now_ms + self.delay_ms,
        });
        true
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return every queued tap whose delay has elapsed, oldest first.
    pub fn take_due(&mut self, now_ms: f64) -> SmallVec<[Vec2; 4]> {
        let mut due = SmallVec::new();
        self.pending.retain(|tap| {
            if tap.due_ms <= now_ms {
                due.push(tap.ndc);
                false
            } else {
                true
            }
        });
        due
    }
}
