use glam::Vec3;

// Shared scene/animation tuning constants used by the core and the web frontend.

// Tree layout
pub const LAYER_COUNT: usize = 4;
pub const TRUNK_Y: f32 = 2.0;
pub const STAR_Y: f32 = 20.5;
pub const STAR_RADIUS: f32 = 1.2;
pub const STAR_EMISSIVE: f32 = 0.8;
pub const LAYER_VERTEX_JITTER: f32 = 0.5; // total span of random vertical vertex jitter
pub const GROUND_SIZE: f32 = 200.0;

// Bulbs
pub const BULB_COUNT: usize = 40;
pub const BULB_RADIUS: f32 = 0.3;
pub const BULB_ANGLE_STEP: f32 = 0.5; // radians between consecutive bulbs
pub const BULB_ANGLE_JITTER: f32 = 0.2;
pub const BULB_MIN_Y: f32 = 2.0;
pub const BULB_Y_SPAN: f32 = 16.0;
pub const BULB_MIN_RADIUS: f32 = 1.5;
pub const BULB_BASE_INTENSITY: f32 = 0.6;
pub const BULB_INTENSITY_SPAN: f32 = 0.4;

// Light flicker
pub const FLICKER_FREQUENCY: f32 = 5.0; // multiplier on seconds
pub const FLICKER_AMPLITUDE: f32 = 0.2;
pub const FLICKER_FLOOR: f32 = 0.2; // emissive never drops below this

// Ornaments (photo gifts)
pub const ORNAMENT_SIZE: f32 = 2.2;
pub const ORNAMENT_DEPTH_RATIO: f32 = 0.1;
pub const ORNAMENT_ANGLE_STEP: f32 = 1.1;
pub const ORNAMENT_BASE_Y: f32 = 3.5;
pub const ORNAMENT_Y_STEP: f32 = 1.8;
pub const ORNAMENT_MIN_RADIUS: f32 = 3.0;
pub const BOW_RADIUS: f32 = 0.35;

// Blossom
pub const BLOSSOM_STEP: f32 = 0.05; // progress per tick, ~20 ticks per cycle
pub const BLOSSOM_YAW_PER_LAYER: f32 = 0.5; // radians at full progress, times layer index
pub const STAR_BLOSSOM_RISE: f32 = 5.0;

// Rotation
pub const BASE_SPEED: f32 = 0.003; // radians per tick
pub const FAST_SPEED: f32 = 0.04;

// Camera
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200.0;
pub const CAMERA_STEP: f32 = 0.04; // transition progress per tick, ~25 ticks
pub const FOCUS_DISTANCE: f32 = 4.5; // along the ornament's local +Z
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 80.0;
pub const ORBIT_POLAR_MARGIN: f32 = 0.1; // keeps the camera above the ground plane
pub const ORBIT_ROTATE_SPEED: f32 = 2.0 * std::f32::consts::PI; // radians per viewport height
pub const ORBIT_ZOOM_SCALE: f32 = 0.95; // distance factor per zoom step

// Snow
pub const SNOW_HALF_EXTENT: f32 = 50.0; // X/Z wrap to [-50, 50)
pub const SNOW_CEILING: f32 = 80.0; // Y stays in [0, 80)
pub const SNOW_RESPAWN_MAX_Y: f32 = 79.99;
pub const SNOW_DRIFT: f32 = 0.1; // horizontal velocity span
pub const SNOW_FALL_MIN: f32 = 0.05;
pub const SNOW_FALL_SPAN: f32 = 0.15;
pub const SNOW_SPIN: f32 = 0.001; // radians per tick for the whole field
pub const SNOW_SIZE: f32 = 0.4; // world-space sprite edge

// Interaction
pub const TOUCH_DELAY_MS: f64 = 100.0;

// UI
pub const UI_DIMMED_OPACITY: f32 = 0.2;
pub const DEFAULT_TITLE: &str = "My Christmas Gift For You";

// Environment colors (linear-ish RGB)
pub const FOG_COLOR: [f32; 3] = [0.106, 0.157, 0.271]; // 0x1b2845
pub const FOG_DENSITY: f32 = 0.015;
pub const AMBIENT_COLOR: [f32; 3] = [1.0, 0.878, 0.71]; // 0xffe0b5
pub const AMBIENT_INTENSITY: f32 = 0.4;
pub const SUN_COLOR: [f32; 3] = [1.0, 0.82, 0.65]; // 0xffd1a6
pub const SUN_INTENSITY: f32 = 1.2;
pub const SUN_POSITION: Vec3 = Vec3::new(20.0, 30.0, 20.0);

pub const LEAF_COLOR: [f32; 3] = [0.176, 0.62, 0.357];
pub const TRUNK_COLOR: [f32; 3] = [0.353, 0.227, 0.137];
pub const STAR_COLOR: [f32; 3] = [1.0, 0.843, 0.0];
pub const GIFT_COLOR: [f32; 3] = [0.753, 0.224, 0.169];
pub const BOW_COLOR: [f32; 3] = [1.0, 0.843, 0.0];
pub const GROUND_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const SNOW_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.8];

pub const BULB_COLORS: [[f32; 3]; 5] = [
    [1.0, 0.2, 0.2],   // red
    [1.0, 0.843, 0.0], // gold
    [0.2, 0.2, 1.0],   // blue
    [0.0, 1.0, 0.0],   // green
    [1.0, 1.0, 1.0],   // white
];
