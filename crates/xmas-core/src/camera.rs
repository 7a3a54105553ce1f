//! Scripted camera fly-to / fly-back between the overview and an ornament.
//!
//! A transition is a plain record advanced once per tick by the animator.
//! `is_animating` stays set for its whole duration and is the only gate
//! against overlapping transitions: `focus` and `unfocus` are silent no-ops
//! while it is set.

use crate::orbit::OrbitControls;
use crate::scene::{NodeId, Scene};
use crate::state::{Camera, CameraPose};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Focus,
    Unfocus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraTransition {
    pub kind: TransitionKind,
    pub start: CameraPose,
    pub end: CameraPose,
    pub progress: f32,
}

/// Emitted by [`CameraState::tick`] on the tick a transition lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraEvent {
    FocusCompleted(NodeId),
    UnfocusCompleted,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
    is_animating: bool,
    focused: Option<NodeId>,
    home: CameraPose,
    transition: Option<CameraTransition>,
    step: f32,
    focus_distance: f32,
}

impl CameraState {
    pub fn new(home: CameraPose, step: f32, focus_distance: f32) -> Self {
        Self {
            is_animating: false,
            focused: None,
            home,
            transition: None,
            step,
            focus_distance,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    /// Ornament the camera is on, or flying toward.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn home(&self) -> CameraPose {
        self.home
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    /// Where the camera ends up when focusing `target`: in front of its +Z face.
    pub fn focus_pose(&self, scene: &Scene, target: NodeId) -> CameraPose {
        let target_pos = scene.world_position(target);
        let offset = scene.world_rotation(target) * Vec3::new(0.0, 0.0, self.focus_distance);
        CameraPose {
            eye: target_pos + offset,
            target: target_pos,
        }
    }

    /// Start flying to `target`. Returns false (and changes nothing) if a
    /// transition is already running.
    pub fn focus(
        &mut self,
        scene: &Scene,
        target: NodeId,
        camera: &Camera,
        orbit: &mut OrbitControls,
    ) -> bool {
        if self.is_animating {
            return false;
        }
        let end = self.focus_pose(scene, target);
        let start = CameraPose {
            eye: camera.eye,
            target: orbit.target,
        };
        orbit.set_enabled(false);
        self.focused = Some(target);
        self.is_animating = true;
        self.transition = Some(CameraTransition {
            kind: TransitionKind::Focus,
            start,
            end,
            progress: 0.0,
        });
        log::info!(
            "[camera] focus node {} -> eye=({:.2},{:.2},{:.2})",
            target.0,
            end.eye.x,
            end.eye.y,
            end.eye.z
        );
        true
    }

    /// Start flying back to the home pose. Same re-entrancy rule as `focus`.
    pub fn unfocus(&mut self, camera: &Camera, orbit: &OrbitControls) -> bool {
        if self.is_animating {
            return false;
        }
        let start = CameraPose {
            eye: camera.eye,
            target: orbit.target,
        };
        self.focused = None;
        self.is_animating = true;
        self.transition = Some(CameraTransition {
            kind: TransitionKind::Unfocus,
            start,
            end: self.home,
            progress: 0.0,
        });
        log::info!("[camera] unfocus");
        true
    }

    /// Advance the running transition one step.
    ///
    /// Orbit controls stay disabled after a focus lands and come back only
    /// when the fly-back completes.
    pub fn tick(&mut self, camera: &mut Camera, orbit: &mut OrbitControls) -> Option<CameraEvent> {
        let tr = self.transition.as_mut()?;
        tr.progress += self.step;
        if tr.progress < 1.0 {
            let pose = tr.start.lerp(&tr.end, tr.progress);
            camera.eye = pose.eye;
            orbit.target = pose.target;
            return None;
        }

        camera.eye = tr.end.eye;
        orbit.target = tr.end.target;
        let kind = tr.kind;
        self.transition = None;
        self.is_animating = false;
        match kind {
            TransitionKind::Focus => {
                log::debug!("[camera] focus complete");
                self.focused.map(CameraEvent::FocusCompleted)
            }
            TransitionKind::Unfocus => {
                orbit.set_enabled(true);
                log::debug!("[camera] back home");
                Some(CameraEvent::UnfocusCompleted)
            }
        }
    }
}
