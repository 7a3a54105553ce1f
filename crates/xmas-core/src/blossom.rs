//! Blossom: the animated radial/vertical spread of the foliage layers.
//!
//! Two resting states (collapsed, expanded) joined by two moving states. A
//! toggle only picks the direction; the tick moves `progress` a fixed step and
//! stops exactly on the bound it was heading for.

use crate::constants::{BLOSSOM_YAW_PER_LAYER, STAR_BLOSSOM_RISE, STAR_Y};
use crate::scene::Scene;
use glam::Quat;

// Snap distance so accumulated float steps land exactly on 0.0 / 1.0.
const BOUND_EPS: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlossomPhase {
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlossomState {
    is_blossomed: bool,
    progress: f32,
    direction: i8,
    step: f32,
}

impl BlossomState {
    pub fn new(step: f32) -> Self {
        Self {
            is_blossomed: false,
            progress: 0.0,
            direction: 0,
            step,
        }
    }

    pub fn is_blossomed(&self) -> bool {
        self.is_blossomed
    }
    pub fn progress(&self) -> f32 {
        self.progress
    }
    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn phase(&self) -> BlossomPhase {
        match self.direction {
            1 => BlossomPhase::Expanding,
            -1 => BlossomPhase::Collapsing,
            _ if self.progress >= 1.0 => BlossomPhase::Expanded,
            _ => BlossomPhase::Collapsed,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.direction != 0
    }

    /// Flip between spreading out and folding back.
    ///
    /// Collapsed/expanding heads for expanded; expanded/collapsing heads for
    /// collapsed. A toggle mid-flight therefore keeps the current direction.
    pub fn toggle(&mut self) {
        match self.phase() {
            BlossomPhase::Collapsed | BlossomPhase::Expanding => {
                self.direction = 1;
                self.is_blossomed = true;
                log::info!("[blossom] expanding from {:.2}", self.progress);
            }
            BlossomPhase::Expanded | BlossomPhase::Collapsing => {
                self.direction = -1;
                self.is_blossomed = false;
                log::info!("[blossom] collapsing from {:.2}", self.progress);
            }
        }
    }

    /// Advance one tick. Returns true if `progress` changed.
    pub fn tick(&mut self) -> bool {
        if self.direction == 0 {
            return false;
        }
        let mut p = self.progress + self.direction as f32 * self.step;
        if self.direction > 0 && p >= 1.0 - BOUND_EPS {
            p = 1.0;
        } else if self.direction < 0 && p <= BOUND_EPS {
            p = 0.0;
        }
        self.progress = p.clamp(0.0, 1.0);

        if (self.direction > 0 && self.progress == 1.0)
            || (self.direction < 0 && self.progress == 0.0)
        {
            self.direction = 0;
            log::debug!("[blossom] settled at {:.1}", self.progress);
        }
        true
    }
}

/// Pose the foliage layers and the star for a given progress.
pub fn apply_blossom(scene: &mut Scene, progress: f32) {
    for i in 0..scene.layers.len() {
        let layer = scene.layers[i];
        let t = &mut scene.node_mut(layer.node).transform;
        t.translation.y = layer.base_y + layer.blossom_offset * progress;
        t.rotation = Quat::from_rotation_y(layer.index as f32 * progress * BLOSSOM_YAW_PER_LAYER);
    }
    let star = scene.star;
    scene.node_mut(star).transform.translation.y = STAR_Y + progress * STAR_BLOSSOM_RISE;
}
