/*!
 * # lyricplay - synchronized lyric player for the terminal
 *
 * A Rust library for rendering timestamped (LRC) lyrics to a terminal.
 *
 * ## Features
 *
 * - Tolerant LRC parsing: repeated timestamps, metadata tags, continuation lines
 * - Realtime playback synchronized to a monotonic clock, with per-line
 *   catch-up when rendering falls behind
 * - Per-genre styling: color, typing speed and character animation effect
 * - Offset, start time and speed multiplier applied without drift
 * - Static schedule listing with the same transformed timestamps
 * - Per-word timing export to JSON
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration and genre profiles
 * - `timecode`: LRC timestamp conversion
 * - `lyrics_processor`: Lyric file parsing
 * - `text_wrap`: Word wrap and backing-vocal segmentation
 * - `effects`: Per-character animation effects
 * - `playback`: Realtime playback:
 *   - `playback::clock`: Monotonic and virtual time sources
 *   - `playback::transform`: Session timing transform
 *   - `playback::animator`: Character emission with the typing cursor
 *   - `playback::scheduler`: The synchronized playback loop
 * - `schedule_printer`: Static schedule listing
 * - `word_timing`: Per-word timing export
 * - `terminal`: ANSI styles, banner and progress bars
 * - `app_controller`: Session orchestration
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod timecode;
pub mod lyrics_processor;
pub mod text_wrap;
pub mod effects;
pub mod playback;
pub mod schedule_printer;
pub mod word_timing;
pub mod terminal;
pub mod app_controller;
pub mod file_utils;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, GenreProfile};
pub use lyrics_processor::{LyricCollection, TimedEntry};
pub use effects::Effect;
pub use playback::{PlaybackTransform, RealtimeScheduler};
pub use word_timing::WordTimingExport;
pub use app_controller::{Controller, SessionOptions, SessionOutcome};
pub use errors::{AppError, ConfigError, LyricError, PlaybackError, TimecodeError};
