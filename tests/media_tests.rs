// Music button state, upload validation, header text and device profiles.

use xmas_core::constants::DEFAULT_TITLE;
use xmas_core::*;

#[test]
fn toggle_play_then_pause() {
    let mut m = MusicPlayer::default();
    assert!(!m.is_playing());
    assert_eq!(m.label(), LABEL_PLAY);

    assert_eq!(m.toggle(), MusicCommand::Play);
    assert!(m.is_playing());
    assert_eq!(m.label(), LABEL_PLAY, "label waits for playback to start");
    assert!(m.play_finished(Ok(())).is_ok());
    assert_eq!(m.label(), LABEL_PAUSE);

    assert_eq!(m.toggle(), MusicCommand::Pause);
    assert!(!m.is_playing());
    assert_eq!(m.label(), LABEL_PLAY);
}

#[test]
fn blocked_playback_reverts_to_stopped() {
    let mut m = MusicPlayer::default();
    m.toggle();
    let err = m
        .play_finished(Err("NotAllowedError".to_string()))
        .expect_err("play was rejected");
    assert_eq!(err, XmasError::PlaybackBlocked("NotAllowedError".to_string()));
    assert_eq!(err.user_message(), "Tap the page first or upload a valid music file~");
    assert!(!m.is_playing());
    assert_eq!(m.label(), LABEL_PLAY);

    // Next press tries again
    assert_eq!(m.toggle(), MusicCommand::Play);
}

#[test]
fn late_play_result_after_pause_keeps_play_label() {
    let mut m = MusicPlayer::default();
    m.toggle();
    m.toggle();
    assert!(m.play_finished(Ok(())).is_ok());
    assert_eq!(m.label(), LABEL_PLAY);
    assert!(!m.is_playing());
}

#[test]
fn accepts_audio_uploads() {
    let mut m = MusicPlayer::default();
    m.toggle();
    m.play_finished(Ok(())).ok();

    let note = m.accept_track("audio/mpeg", "carol.mp3").expect("audio is accepted");
    assert_eq!(note, "Switched to: carol.mp3");
    assert!(!m.is_playing(), "new track starts paused");
    assert_eq!(m.label(), LABEL_NEW_TRACK);
    assert_eq!(m.track_name(), Some("carol.mp3"));
}

#[test]
fn rejects_non_audio_uploads() {
    let mut m = MusicPlayer::default();
    let err = m.accept_track("image/png", "tree.png").expect_err("not audio");
    assert!(matches!(err, XmasError::UnsupportedMedia { expected: "audio", .. }));
    assert_eq!(err.user_message(), "Please upload an audio file (mp3, wav, etc.)");
    assert_eq!(m, MusicPlayer::default(), "state untouched");
}

#[test]
fn header_title_falls_back_on_blank() {
    assert_eq!(header_title(""), DEFAULT_TITLE);
    assert_eq!(header_title("   \t"), DEFAULT_TITLE);
    assert_eq!(header_title("Merry Christmas!"), "Merry Christmas!");
    assert_eq!(header_title("  spaced  "), "  spaced  ", "non-blank text is kept verbatim");
}

#[test]
fn only_images_become_ornaments() {
    assert!(is_image_mime("image/jpeg"));
    assert!(is_image_mime("image/png"));
    assert!(!is_image_mime("audio/mpeg"));
    assert!(!is_image_mime(""));
}

#[test]
fn error_messages_are_user_facing() {
    let cam = XmasError::CameraUnavailable("NotAllowedError".into());
    assert_eq!(cam.user_message(), "Unable to open the camera, please check permissions.");
    assert!(cam.to_string().contains("NotAllowedError"));
    let tracker = XmasError::TrackerUnavailable("offline".into());
    assert!(tracker.user_message().contains("gesture"));
}

#[test]
fn device_profile_from_user_agent() {
    let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
    let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile";
    let desktop = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0";

    assert_eq!(DeviceProfile::from_user_agent(iphone), DeviceProfile::Mobile);
    assert_eq!(DeviceProfile::from_user_agent(android), DeviceProfile::Mobile);
    assert_eq!(DeviceProfile::from_user_agent(desktop), DeviceProfile::Desktop);

    let mobile = DeviceProfile::Mobile;
    let pc = DeviceProfile::Desktop;
    assert!(mobile.snow_particle_count() < pc.snow_particle_count());
    assert!(mobile.max_pixel_ratio() < pc.max_pixel_ratio());
    assert!(mobile.webcam_width() < pc.webcam_width());
    assert!(
        mobile.initial_camera_eye().length() > pc.initial_camera_eye().length(),
        "mobile sits further back"
    );
}
