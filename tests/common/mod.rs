/*!
 * Common test utilities for the lyricplay test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use lyricplay::app_config::{Config, GenreProfile};
use lyricplay::effects::Effect;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Sample LRC content with metadata, a repeated timestamp and a continuation line
pub const SAMPLE_LRC: &str = "[ti:Test Song]
[ar:Test Artist]
[00:01.00]First line
[00:03.50]Second line (ooh)
continued here
[00:06.00][00:09.00]Chorus line
";

/// Creates a sample lyric file for testing
pub fn create_test_lyrics(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_LRC)
}

/// Deterministic genre: no random delays, no character doubling
pub fn plain_genre(speed: f64) -> GenreProfile {
    GenreProfile::new("\x1b[93m", speed, Effect::Plain, "Plain test genre")
}

/// Config with every pause and bar disabled so sessions finish instantly
pub fn quiet_config() -> Config {
    let mut config = Config::default();
    config.margin_between_lines = 0.0;
    config.block_margin = 0.0;
    config.auto_close_seconds = 0.0;
    config.loading_opening = 0;
    config.loading_ending = 0;
    config.show_time_display = false;
    config.genres.insert("plain".to_string(), plain_genre(0.001));
    config
}

/// Float comparison with a tolerance suited to Duration round trips
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {} to be close to {}",
        actual,
        expected
    );
}
