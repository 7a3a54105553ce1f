use thiserror::Error;

/// Recoverable failures surfaced to the user as notifications.
///
/// None of these are fatal: the affected feature is disabled or the request is
/// dropped, and the scene keeps animating.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum XmasError {
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("hand tracking unavailable: {0}")]
    TrackerUnavailable(String),
    #[error("playback blocked: {0}")]
    PlaybackBlocked(String),
    #[error("unsupported media type `{mime}` (expected {expected})")]
    UnsupportedMedia { mime: String, expected: &'static str },
}

impl XmasError {
    /// Short message shown in the browser notification.
    pub fn user_message(&self) -> String {
        match self {
            XmasError::CameraUnavailable(_) => {
                "Unable to open the camera, please check permissions.".to_string()
            }
            XmasError::TrackerUnavailable(_) => {
                "Hand tracking could not be loaded; gesture control is disabled.".to_string()
            }
            XmasError::PlaybackBlocked(_) => {
                "Tap the page first or upload a valid music file~".to_string()
            }
            XmasError::UnsupportedMedia { expected, .. } => {
                format!("Please upload an {expected} file (mp3, wav, etc.)")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, XmasError>;
