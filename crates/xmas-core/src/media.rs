//! Background music and header text bookkeeping.
//!
//! The audio element itself lives in the web frontend; this tracks what the
//! button should say and decides how play attempts and uploads are handled.

use crate::constants::DEFAULT_TITLE;
use crate::error::{Result, XmasError};

pub const LABEL_PLAY: &str = "🎵 Play music";
pub const LABEL_PAUSE: &str = "⏸ Pause music";
pub const LABEL_NEW_TRACK: &str = "🎵 Play new song";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MusicCommand {
    Play,
    Pause,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MusicPlayer {
    playing: bool,
    label: &'static str,
    track_name: Option<String>,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self {
            playing: false,
            label: LABEL_PLAY,
            track_name: None,
        }
    }
}

impl MusicPlayer {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Name of the last uploaded track, if the default one was replaced.
    pub fn track_name(&self) -> Option<&str> {
        self.track_name.as_deref()
    }

    /// Button press. The caller performs the returned command and, for
    /// `Play`, reports back through [`MusicPlayer::play_finished`].
    pub fn toggle(&mut self) -> MusicCommand {
        if self.playing {
            self.playing = false;
            self.label = LABEL_PLAY;
            log::info!("[music] pause");
            MusicCommand::Pause
        } else {
            self.playing = true;
            log::info!("[music] play requested");
            MusicCommand::Play
        }
    }

    /// Outcome of the asynchronous play request. A rejected play (autoplay
    /// policy, missing source) leaves the player stopped.
    pub fn play_finished(&mut self, result: std::result::Result<(), String>) -> Result<()> {
        match result {
            Ok(()) => {
                if self.playing {
                    self.label = LABEL_PAUSE;
                }
                Ok(())
            }
            Err(reason) => {
                log::warn!("[music] play rejected: {}", reason);
                self.playing = false;
                self.label = LABEL_PLAY;
                Err(XmasError::PlaybackBlocked(reason))
            }
        }
    }

    /// Validate an uploaded track. On success the player resets to stopped
    /// and the returned string is the notification to show.
    pub fn accept_track(&mut self, mime: &str, name: &str) -> Result<String> {
        if !mime.starts_with("audio/") {
            log::warn!("[music] rejected upload `{}` ({})", name, mime);
            return Err(XmasError::UnsupportedMedia {
                mime: mime.to_string(),
                expected: "audio",
            });
        }
        self.playing = false;
        self.label = LABEL_NEW_TRACK;
        self.track_name = Some(name.to_string());
        log::info!("[music] switched to {}", name);
        Ok(format!("Switched to: {name}"))
    }
}

/// Header text for the theme input; blank input falls back to the default title.
pub fn header_title(input: &str) -> String {
    if input.trim().is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        input.to_string()
    }
}

/// Only images are turned into ornaments.
pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}
