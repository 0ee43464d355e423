/*!
 * Integration tests for application lifecycle
 */

use std::future::pending;
use std::time::{Duration, Instant};
use anyhow::Result;
use lyricplay::app_config::Config;
use lyricplay::app_controller::{Controller, SessionOptions, SessionOutcome};
use lyricplay::errors::{ConfigError, LyricError, PlaybackError};
use lyricplay::word_timing::WordTimingExport;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;

    assert_eq!(controller.config().default_genre, "hiphop");
    assert_eq!(controller.resolve_genre(None)?.speed, 0.012);
    Ok(())
}

/// Test that an invalid configuration is rejected up front
#[test]
fn test_controller_with_invalidConfig_shouldFail() {
    let mut config = Config::default();
    config.wrap_width = 0;

    assert!(Controller::with_config(config).is_err());
}

/// Test a schedule-mode session with JSON export
#[tokio::test]
async fn test_run_withScheduleModeAndExport_shouldCompleteAndWriteJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lyric_path = common::create_test_lyrics(temp_dir.path(), "song.lrc")?;
    let json_path = temp_dir.path().join("out").join("song.json");
    let controller = Controller::with_config(common::quiet_config())?;

    let mut options = SessionOptions::new(&lyric_path);
    options.genre = Some("Jazz".to_string());
    options.offset = 1.0;
    options.export_json = Some(json_path.clone());

    let outcome = controller.run_until(&options, pending::<()>).await?;

    assert_eq!(outcome, SessionOutcome::Completed);
    let export: WordTimingExport = serde_json::from_str(&std::fs::read_to_string(&json_path)?)?;
    assert_eq!(export.captions.len(), 4);
    Ok(())
}

/// Test a short realtime session
#[tokio::test]
async fn test_run_withRealtime_shouldComplete() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lyric_path = common::create_test_file(temp_dir.path(), "short.lrc", "[00:00.00]hi\n[00:00.05]yo")?;
    let controller = Controller::with_config(common::quiet_config())?;

    let mut options = SessionOptions::new(&lyric_path);
    options.genre = Some("plain".to_string());
    options.realtime = true;
    options.speed_multiplier = 2.0;

    let outcome = controller.run_until(&options, pending::<()>).await?;

    assert_eq!(outcome, SessionOutcome::Completed);
    Ok(())
}

/// Test that an unknown genre aborts with the listing
#[tokio::test]
async fn test_run_withUnknownGenre_shouldReturnListing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lyric_path = common::create_test_lyrics(temp_dir.path(), "song.lrc")?;
    let controller = Controller::with_config(common::quiet_config())?;

    let mut options = SessionOptions::new(&lyric_path);
    options.genre = Some("polka".to_string());

    let err = controller.run(&options).await.unwrap_err();

    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::UnknownGenre { name, available }) => {
            assert_eq!(name, "polka");
            assert!(available.iter().any(|(genre, _)| genre == "plain"));
        }
        other => panic!("expected UnknownGenre, got {:?}", other),
    }
    Ok(())
}

/// Test that a non-positive speed multiplier is rejected
#[tokio::test]
async fn test_run_withZeroSpeed_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lyric_path = common::create_test_lyrics(temp_dir.path(), "song.lrc")?;
    let controller = Controller::with_config(common::quiet_config())?;

    let mut options = SessionOptions::new(&lyric_path);
    options.speed_multiplier = 0.0;

    let err = controller.run(&options).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PlaybackError>(),
        Some(PlaybackError::InvalidSpeedMultiplier(_))
    ));
    Ok(())
}

/// Test that a missing lyric file is reported
#[tokio::test]
async fn test_run_withMissingFile_shouldFailWithReadError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(common::quiet_config())?;
    let options = SessionOptions::new(temp_dir.path().join("missing.lrc"));

    let err = controller.run(&options).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<LyricError>(), Some(LyricError::Read { .. })));
    Ok(())
}

/// Test that a bad configured default does not block a valid requested genre
#[tokio::test]
async fn test_run_withUnknownDefaultGenreAndValidRequest_shouldComplete() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lyric_path = common::create_test_lyrics(temp_dir.path(), "song.lrc")?;
    let mut config = common::quiet_config();
    config.default_genre = "polka".to_string();
    let controller = Controller::with_config(config)?;

    let mut options = SessionOptions::new(&lyric_path);
    options.genre = Some("jazz".to_string());

    let outcome = controller.run_until(&options, pending::<()>).await?;

    assert_eq!(outcome, SessionOutcome::Completed);
    Ok(())
}

/// Test that an unknown configured default is reported with the listing when picked
#[tokio::test]
async fn test_run_withUnknownDefaultGenrePicked_shouldReturnListing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lyric_path = common::create_test_lyrics(temp_dir.path(), "song.lrc")?;
    let mut config = common::quiet_config();
    config.default_genre = "polka".to_string();
    let controller = Controller::with_config(config)?;

    let err = controller.run_until(&SessionOptions::new(&lyric_path), pending::<()>).await.unwrap_err();

    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::UnknownGenre { name, available }) => {
            assert_eq!(name, "polka");
            assert_eq!(available.len(), controller.config().genres.len());
        }
        other => panic!("expected UnknownGenre, got {:?}", other),
    }
    Ok(())
}

/// Test that an interrupt during the auto-close hold ends the session
#[tokio::test]
async fn test_run_until_withInterruptDuringHold_shouldStopWaiting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lyric_path = common::create_test_lyrics(temp_dir.path(), "song.lrc")?;
    let mut config = common::quiet_config();
    config.auto_close_seconds = 30.0;
    let controller = Controller::with_config(config)?;
    let started = Instant::now();

    let outcome = controller
        .run_until(&SessionOptions::new(&lyric_path), || tokio::time::sleep(Duration::from_millis(100)))
        .await?;

    assert_eq!(outcome, SessionOutcome::Interrupted);
    assert!(started.elapsed() < Duration::from_secs(10));
    Ok(())
}

/// Test that an interrupt during realtime playback skips the remaining entries and the hold
#[tokio::test]
async fn test_run_until_withInterruptDuringPlayback_shouldReportInterrupted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lyric_path = common::create_test_file(temp_dir.path(), "long.lrc", "[00:00.00]hi\n[00:30.00]later")?;
    let mut config = common::quiet_config();
    config.auto_close_seconds = 30.0;
    let controller = Controller::with_config(config)?;
    let started = Instant::now();

    let mut options = SessionOptions::new(&lyric_path);
    options.genre = Some("plain".to_string());
    options.realtime = true;

    let outcome = controller
        .run_until(&options, || tokio::time::sleep(Duration::from_millis(100)))
        .await?;

    assert_eq!(outcome, SessionOutcome::Interrupted);
    assert!(started.elapsed() < Duration::from_secs(10));
    Ok(())
}

/// Test that a real SIGINT still stops the session during the auto-close hold
#[cfg(unix)]
#[tokio::test]
async fn test_run_withSigintDuringHold_shouldStopWaiting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let lyric_path = common::create_test_lyrics(temp_dir.path(), "song.lrc")?;
    let mut config = common::quiet_config();
    config.auto_close_seconds = 30.0;
    let controller = Controller::with_config(config)?;

    let pid = std::process::id().to_string();
    let sender = tokio::spawn(async move {
        // Leave time for the hold to start listening
        tokio::time::sleep(Duration::from_millis(500)).await;
        std::process::Command::new("kill").args(["-INT", &pid]).status()
    });
    let started = Instant::now();

    let outcome = controller.run(&SessionOptions::new(&lyric_path)).await?;

    assert_eq!(outcome, SessionOutcome::Interrupted);
    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(sender.await??.success());
    Ok(())
}
