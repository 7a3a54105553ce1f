//! Free orbit camera control with damping.
//!
//! Pointer drags and wheel steps accumulate deltas; `update` bleeds a fraction
//! of them into the camera each frame so motion eases out. While a scripted
//! camera transition runs the controls are disabled and accept no input.

use crate::constants::*;
use crate::state::Camera;
use glam::{Vec2, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    enabled: bool,
    damping: f32,
    min_distance: f32,
    max_distance: f32,
    max_polar: f32,
    theta_delta: f32,
    phi_delta: f32,
    zoom_scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enabled: true,
            damping: ORBIT_DAMPING,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            max_polar: std::f32::consts::FRAC_PI_2 - ORBIT_POLAR_MARGIN,
            theta_delta: 0.0,
            phi_delta: 0.0,
            zoom_scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enabling/disabling drops any pending momentum.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.zoom_scale = 1.0;
    }

    /// Rotate by a pointer drag, `delta_px` in CSS pixels over a viewport of `viewport_height`.
    pub fn rotate(&mut self, delta_px: Vec2, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        self.theta_delta -= ORBIT_ROTATE_SPEED * delta_px.x / viewport_height;
        self.phi_delta -= ORBIT_ROTATE_SPEED * delta_px.y / viewport_height;
    }

    /// Wheel or pinch zoom; positive `steps` moves away from the target.
    /// Fractional steps scale proportionally, so small pinch moves zoom a little.
    pub fn zoom(&mut self, steps: f32) {
        if !self.enabled || steps == 0.0 || !steps.is_finite() {
            return;
        }
        self.zoom_scale *= ORBIT_ZOOM_SCALE.powf(-steps);
    }

    /// Apply damped deltas and aim the camera at `target`.
    pub fn update(&mut self, camera: &mut Camera) {
        if self.enabled {
            let offset = camera.eye - self.target;
            let radius = offset.length().max(1e-4);
            let mut theta = offset.x.atan2(offset.z);
            let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

            theta += self.theta_delta * self.damping;
            phi += self.phi_delta * self.damping;
            phi = phi.clamp(1e-3, self.max_polar);
            let radius = (radius * self.zoom_scale).clamp(self.min_distance, self.max_distance);

            camera.eye = self.target
                + Vec3::new(
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                    radius * phi.sin() * theta.cos(),
                );

            self.theta_delta *= 1.0 - self.damping;
            self.phi_delta *= 1.0 - self.damping;
            self.zoom_scale = 1.0;
        }
        camera.target = self.target;
    }
}
