// Frontend timing and DOM wiring constants. Scene tuning lives in
// `xmas_core::constants`; these only concern the page.

// Loading overlay: fade starts after the delay, element is removed once the CSS fade finishes
pub const LOADING_FADE_DELAY_MS: i32 = 1500;
pub const LOADING_REMOVE_DELAY_MS: i32 = 600;

// Pointer travel (CSS px) below which a press/release counts as a click rather than a drag
pub const CLICK_SLOP_PX: f32 = 6.0;

// Wheel delta (px) that corresponds to one zoom step
pub const WHEEL_STEP_PX: f32 = 100.0;

// Change in two-finger separation (CSS px) that corresponds to one zoom step
pub const PINCH_STEP_PX: f32 = 20.0;

// Panel opacity when no ornament is focused
pub const UI_FULL_OPACITY: f32 = 1.0;

// Element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const LOADING_ID: &str = "loading";
pub const UI_PANEL_ID: &str = "ui-panel";
pub const TITLE_SELECTOR: &str = "#ui-panel h1";
pub const MUSIC_BUTTON_ID: &str = "music-btn";
pub const MUSIC_AUDIO_ID: &str = "bg-music";
pub const MUSIC_INPUT_ID: &str = "music-input";
pub const PHOTO_INPUT_ID: &str = "file-input";
pub const CAM_BUTTON_ID: &str = "cam-btn";
pub const CAM_WRAPPER_SELECTOR: &str = ".cam-wrapper";
pub const WEBCAM_ID: &str = "webcam";
pub const THEME_INPUT_ID: &str = "theme-text-input";
