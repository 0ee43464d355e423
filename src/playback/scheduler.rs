/*!
 * Wall-clock synchronized lyric playback.
 *
 * Every entry is due at a session time derived from its start through the
 * `PlaybackTransform`. The scheduler sleeps until an entry is due, types it
 * line by line, and when it falls behind it speeds up typing for each
 * wrapped line (re-evaluated per line) to win the time back.
 */

use std::io::Write;
use log::debug;
use rand::Rng;

use crate::app_config::{Config, GenreProfile};
use crate::errors::PlaybackError;
use crate::lyrics_processor::TimedEntry;
use crate::playback::animator::{Animator, Stage};
use crate::playback::clock::Clock;
use crate::playback::transform::PlaybackTransform;
use crate::terminal::{self, GRAY, RESET};
use crate::text_wrap::{segment_line, wrap_text};
use crate::timecode::format_clock;

/// Largest typing speedup applied while catching up
pub const MAX_CATCH_UP_FACTOR: f64 = 3.0;

/// Speedup gained per second of drift
const CATCH_UP_PER_SECOND: f64 = 2.0;

/// Per-character delay never drops below this while catching up
pub const MIN_CHAR_DELAY_SECS: f64 = 0.001;

/// Per-character delay for a line whose rendering starts `drift` seconds
/// late. Positive drift divides `base_delay` by `min(3, 1 + 2·drift)`.
pub fn catch_up_delay(base_delay: f64, drift: f64) -> f64 {
    if drift > 0.0 {
        let factor = (1.0 + drift * CATCH_UP_PER_SECOND).min(MAX_CATCH_UP_FACTOR);
        (base_delay / factor).max(MIN_CHAR_DELAY_SECS)
    } else {
        base_delay
    }
}

/// Layout and pacing settings of a playback session
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSettings {
    /// Maximum characters per rendered line
    pub wrap_width: usize,
    /// Pause after every rendered line, in seconds
    pub margin_between_lines: f64,
    /// Pause after every entry, in seconds
    pub block_margin: f64,
    /// Print the elapsed-time readout before each entry
    pub show_time_display: bool,
    /// Song position of the first entry, added to the readout
    pub start_offset: f64,
}

impl PlaybackSettings {
    /// Settings from the configuration, with an optional wrap width override
    pub fn from_config(config: &Config, wrap_width: Option<usize>) -> Self {
        Self {
            wrap_width: wrap_width.unwrap_or(config.wrap_width),
            margin_between_lines: config.margin_between_lines,
            block_margin: config.block_margin,
            show_time_display: config.show_time_display,
            start_offset: config.start_offset_secs(),
        }
    }
}

/// When an entry was due and when its rendering began
#[derive(Debug, Clone, PartialEq)]
pub struct EntryReport {
    pub index: usize,
    pub scheduled_start: f64,
    pub started_at: f64,
}

/// Drift and typing delay used for one wrapped line
#[derive(Debug, Clone, PartialEq)]
pub struct LineReport {
    pub entry_index: usize,
    pub text: String,
    pub drift: f64,
    pub char_delay: f64,
}

/// What a playback session did, for diagnostics and tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackReport {
    pub entries: Vec<EntryReport>,
    pub lines: Vec<LineReport>,
}

/// Plays entries in sync with a clock
pub struct RealtimeScheduler<'a> {
    genre: &'a GenreProfile,
    transform: PlaybackTransform,
    settings: PlaybackSettings,
}

impl<'a> RealtimeScheduler<'a> {
    pub fn new(genre: &'a GenreProfile, transform: PlaybackTransform, settings: PlaybackSettings) -> Self {
        Self {
            genre,
            transform,
            settings,
        }
    }

    /// Run a session over `entries`.
    ///
    /// The stage's clock must have been started at the session baseline.
    /// The future only suspends at its scheduled sleeps, and every unit it
    /// writes leaves the terminal style reset, so dropping it between units
    /// is safe.
    pub async fn play<C: Clock, R: Rng, W: Write>(
        &self,
        entries: &[TimedEntry],
        stage: &mut Stage<'_, C, R, W>,
    ) -> Result<PlaybackReport, PlaybackError> {
        let mut report = PlaybackReport::default();
        let Some(first) = entries.first() else {
            return Ok(report);
        };

        let first_start = first.start;
        let base_delay = self.transform.char_delay(self.genre.speed);
        let animator = Animator::new(self.genre.effect);
        let dim_color = terminal::dimmed(&self.genre.color);
        debug!("Playing {} entries with effect {}, char delay {:.4}s", entries.len(), self.genre.effect, base_delay);

        for (idx, entry) in entries.iter().enumerate() {
            let absolute_start = self.transform.absolute(entry.start, first_start);
            let wait = absolute_start - stage.clock.elapsed_secs();
            stage.pause(wait).await;

            let started_at = stage.clock.elapsed_secs();
            debug!(
                "Entry {} due at {:.3}s, started at {:.3}s",
                idx, absolute_start, started_at
            );
            report.entries.push(EntryReport {
                index: idx,
                scheduled_start: absolute_start,
                started_at,
            });

            if self.settings.show_time_display {
                let readout = format_clock(absolute_start, self.settings.start_offset);
                stage.emit(&format!("{}[{}]{}\n", GRAY, readout, RESET))?;
            }

            for text_line in entry.text.split('\n') {
                for wrapped in wrap_text(text_line, self.settings.wrap_width) {
                    let drift = stage.clock.elapsed_secs() - absolute_start;
                    let char_delay = catch_up_delay(base_delay, drift);

                    for segment in segment_line(&wrapped) {
                        let color = if segment.dimmed { dim_color.as_str() } else { self.genre.color.as_str() };
                        animator.animate(stage, &segment.text, color, char_delay).await?;
                    }
                    stage.emit("\n")?;

                    report.lines.push(LineReport {
                        entry_index: idx,
                        text: wrapped,
                        drift,
                        char_delay,
                    });
                    stage.pause(self.settings.margin_between_lines).await;
                }
            }
            stage.emit("\n")?;

            let trailing = match entries.get(idx + 1) {
                Some(next) => {
                    let remaining = self.transform.absolute(next.start, first_start) - stage.clock.elapsed_secs();
                    self.settings.block_margin.min(remaining.max(0.0))
                }
                None => self.settings.block_margin,
            };
            stage.pause(trailing).await;
        }

        Ok(report)
    }
}
