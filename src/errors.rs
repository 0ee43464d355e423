/*!
 * Error types for the lyricplay application.
 *
 * This module contains custom error types for the different stages of a
 * playback session, using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when converting timestamps
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimecodeError {
    /// The token does not have the `M:SS.ff` / `M:SS.fff` / seconds shape
    #[error("Malformed timestamp: '{0}'")]
    Malformed(String),

    /// A numeric component could not be parsed
    #[error("Invalid number '{value}' in timestamp '{token}'")]
    InvalidNumber {
        /// The whole token being parsed
        token: String,
        /// The offending component
        value: String,
    },
}

/// Errors that can occur while loading lyric files
#[derive(Error, Debug)]
pub enum LyricError {
    /// The lyric file could not be read
    #[error("Failed to read lyric file {path:?}: {source}")]
    Read {
        /// Path of the lyric file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The input held no timestamped lines
    #[error("Lyrics are empty or malformed: {0:?}")]
    Empty(PathBuf),

    /// A timestamp token could not be converted
    #[error("Timecode error: {0}")]
    Timecode(#[from] TimecodeError),
}

/// Errors that can occur during playback
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The speed multiplier must be a finite number greater than zero
    #[error("Speed multiplier must be > 0 (got {0})")]
    InvalidSpeedMultiplier(f64),

    /// Writing to the terminal failed
    #[error("Terminal write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file exists but could not be parsed
    #[error("Failed to parse config file {path:?}: {message}")]
    Parse {
        /// Path of the configuration file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A setting has an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// The requested genre is not configured
    #[error("Genre '{name}' not found")]
    UnknownGenre {
        /// The requested genre name
        name: String,
        /// Every configured genre as `(name, description)`, sorted by name
        available: Vec<(String, String)>,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from lyric loading
    #[error("Lyric error: {0}")]
    Lyric(#[from] LyricError),

    /// Error from playback
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Error from configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from time input parsing
    #[error("Timecode error: {0}")]
    Timecode(#[from] TimecodeError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
// Recovers the typed error behind an anyhow chain, falling back to Unknown
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<LyricError>() {
            Ok(e) => return Self::Lyric(e),
            Err(error) => error,
        };
        let error = match error.downcast::<ConfigError>() {
            Ok(e) => return Self::Config(e),
            Err(error) => error,
        };
        let error = match error.downcast::<PlaybackError>() {
            Ok(e) => return Self::Playback(e),
            Err(error) => error,
        };
        let error = match error.downcast::<TimecodeError>() {
            Ok(e) => return Self::Timecode(e),
            Err(error) => error,
        };
        match error.downcast::<std::io::Error>() {
            Ok(e) => Self::from(e),
            Err(error) => Self::Unknown(format!("{:#}", error)),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
