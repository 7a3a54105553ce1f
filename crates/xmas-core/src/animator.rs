//! The per-frame tick and the world it advances.
//!
//! `World` owns every piece of mutable scene and interaction state. The web
//! frontend holds it behind one `Rc<RefCell<_>>` and only ever borrows it for
//! the duration of a callback, so the tick, gesture samples and DOM events
//! never interleave.

use crate::blossom::apply_blossom;
use crate::camera::CameraEvent;
use crate::config::{AnimationParams, DeviceProfile, GestureConfig};
use crate::constants::{FLICKER_AMPLITUDE, FLICKER_FLOOR, FLICKER_FREQUENCY};
use crate::gesture::{apply_gesture, GestureInterpreter, GestureOutput, GestureSample};
use crate::media::MusicPlayer;
use crate::orbit::OrbitControls;
use crate::router::{route_tap, InteractionRouter, TapOutcome};
use crate::scene::{NodeId, PhotoHandle, Scene};
use crate::snow::SnowField;
use crate::state::{Camera, CameraPose, SceneState};
use glam::{Vec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;

/// Emissive intensity of a bulb at `time_sec`.
#[inline]
pub fn flicker_intensity(base: f32, phase: f32, time_sec: f32) -> f32 {
    (base + (time_sec * FLICKER_FREQUENCY + phase).sin() * FLICKER_AMPLITUDE).max(FLICKER_FLOOR)
}

/// What happened during one tick that the frontend has to react to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub camera_events: SmallVec<[CameraEvent; 1]>,
    pub taps: SmallVec<[TapOutcome; 4]>,
}

pub struct World {
    pub scene: Scene,
    pub state: SceneState,
    pub camera: Camera,
    pub orbit: OrbitControls,
    pub snow: SnowField,
    pub router: InteractionRouter,
    pub gesture: GestureInterpreter,
    pub music: MusicPlayer,
    profile: DeviceProfile,
    smoothing: f32,
}

impl World {
    pub fn new<R: Rng + ?Sized>(
        profile: DeviceProfile,
        params: &AnimationParams,
        gesture: GestureConfig,
        aspect: f32,
        rng: &mut R,
    ) -> Self {
        let home = CameraPose {
            eye: profile.initial_camera_eye(),
            target: Vec3::ZERO,
        };
        let scene = Scene::build(rng);
        let snow = SnowField::new(profile.snow_particle_count(), rng);
        log::info!(
            "[render] world ready: {:?}, {} snowflakes",
            profile,
            snow.len()
        );
        Self {
            scene,
            state: SceneState::new(params, home),
            camera: Camera::new(home.eye, aspect),
            orbit: OrbitControls::default(),
            snow,
            router: InteractionRouter::new(params.touch_delay_ms),
            smoothing: gesture.smoothing,
            gesture: GestureInterpreter::new(gesture),
            music: MusicPlayer::default(),
            profile,
        }
    }

    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    /// Advance everything by one display frame.
    pub fn tick(&mut self, time_sec: f32, now_ms: f64) -> FrameReport {
        let mut report = FrameReport::default();

        for ndc in self.router.take_due(now_ms) {
            report.taps.push(route_tap(
                ndc,
                &self.scene,
                &mut self.state,
                &self.camera,
                &mut self.orbit,
            ));
        }

        if self.state.is_rotating() {
            self.state.rotation.spin();
            self.scene.set_tree_rotation(self.state.rotation.angle());
        }
        self.state.rotation.smooth(self.smoothing);

        if self.state.blossom.tick() {
            apply_blossom(&mut self.scene, self.state.blossom.progress());
        }

        for i in 0..self.scene.bulbs.len() {
            let bulb = self.scene.bulbs[i];
            self.scene.node_mut(bulb.node).material.emissive_intensity =
                flicker_intensity(bulb.base_intensity, bulb.phase, time_sec);
        }

        self.snow.tick();

        if let Some(ev) = self.state.camera.tick(&mut self.camera, &mut self.orbit) {
            report.camera_events.push(ev);
        }
        self.orbit.update(&mut self.camera);
        report
    }

    /// Mouse click, routed immediately.
    pub fn click(&mut self, ndc: Vec2) -> TapOutcome {
        route_tap(
            ndc,
            &self.scene,
            &mut self.state,
            &self.camera,
            &mut self.orbit,
        )
    }

    pub fn touch_start(&mut self, touch_count: usize, ndc: Vec2, now_ms: f64) -> bool {
        self.router.on_touch_start(touch_count, ndc, now_ms)
    }

    /// Feed one hand-landmark sample. `None` means the frame was a repeat.
    pub fn gesture_sample(&mut self, sample: &GestureSample) -> Option<GestureOutput> {
        let focused = self.state.camera.focused().is_some();
        let output = self.gesture.process(sample, focused, &self.state.rotation)?;
        apply_gesture(&output, &mut self.state.rotation, &mut self.state.blossom);
        Some(output)
    }

    pub fn add_photo(&mut self, photo: PhotoHandle) -> NodeId {
        self.scene.add_ornament(photo)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_aspect(width, height);
    }
}
