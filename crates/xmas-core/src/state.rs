//! Shared scene state and the camera description.
//!
//! `SceneState` is the single mutable owner of the animation/interaction
//! state. It is split into field groups and each group is mutated only through
//! the methods of the component that owns it:
//!
//! - [`RotationState`]: the animator advances `angle`/`speed`; gesture input
//!   only sets `target_speed`.
//! - [`BlossomState`]: only the blossom state machine.
//! - [`CameraState`]: only the camera transition controller.
//!
//! Whether the tree spins freely is derived from the other groups rather than
//! stored, so no component can leave a stale "is rotating" flag behind.

use crate::blossom::BlossomState;
use crate::camera::CameraState;
use crate::config::AnimationParams;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Vec3, aspect: f32) -> Self {
        use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye,
            target: self.target,
        }
    }

    /// Resize only touches the projection; the current pose stays authoritative.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray through a point given in normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    ///
    /// Returns `(ray_origin, ray_direction)`; the origin is the camera eye.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (self.eye, (p1 - self.eye).normalize())
    }
}

/// Camera eye plus the point it orbits/looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn lerp(&self, end: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            eye: self.eye.lerp(end.eye, t),
            target: self.target.lerp(end.target, t),
        }
    }
}

/// Tree spin. Angles are radians, speeds are radians per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct RotationState {
    angle: f32,
    speed: f32,
    target_speed: f32,
    base_speed: f32,
    fast_speed: f32,
}

impl RotationState {
    pub fn new(base_speed: f32, fast_speed: f32) -> Self {
        Self {
            angle: 0.0,
            speed: base_speed,
            target_speed: base_speed,
            base_speed,
            fast_speed,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
    pub fn speed(&self) -> f32 {
        self.speed
    }
    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }
    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }
    pub fn fast_speed(&self) -> f32 {
        self.fast_speed
    }

    pub fn set_target_speed(&mut self, target: f32) {
        self.target_speed = target;
    }

    /// Move `speed` a fraction of the way toward `target_speed`.
    pub fn smooth(&mut self, factor: f32) {
        self.speed += (self.target_speed - self.speed) * factor;
    }

    /// Advance the angle by one tick at the current speed.
    pub fn spin(&mut self) {
        self.angle = (self.angle + self.speed) % std::f32::consts::TAU;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub rotation: RotationState,
    pub blossom: BlossomState,
    pub camera: CameraState,
}

impl SceneState {
    pub fn new(params: &AnimationParams, home: CameraPose) -> Self {
        Self {
            rotation: RotationState::new(params.base_speed, params.fast_speed),
            blossom: BlossomState::new(params.blossom_step),
            camera: CameraState::new(home, params.camera_step, params.focus_distance),
        }
    }

    /// Free rotation runs only while nothing else owns the tree's orientation.
    pub fn is_rotating(&self) -> bool {
        !self.blossom.is_blossomed()
            && self.camera.focused().is_none()
            && !self.camera.is_animating()
    }
}
