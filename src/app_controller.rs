use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::app_config::{Config, GenreProfile};
use crate::errors::ConfigError;
use crate::lyrics_processor::{LyricCollection, TimedEntry};
use crate::playback::clock::duration_from_secs;
use crate::playback::{MonotonicClock, PlaybackSettings, PlaybackTransform, RealtimeScheduler, Stage};
use crate::schedule_printer;
use crate::terminal::{self, RESET, YELLOW};
use crate::word_timing::WordTimingExport;

// @module: Application controller for playback sessions

/// Everything a session needs from the command line
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Lyric file to play
    pub lyric_file: PathBuf,
    /// Genre name; the configured default when absent
    pub genre: Option<String>,
    /// Realtime animated playback instead of the schedule listing
    pub realtime: bool,
    /// Seconds added to every scheduled time
    pub offset: f64,
    /// Session time of the first entry
    pub start_time: Option<f64>,
    /// Timing and typing speed multiplier
    pub speed_multiplier: f64,
    /// Wrap width override
    pub wrap_width: Option<usize>,
    /// Auto-close delay override, in seconds
    pub auto_close: Option<f64>,
    /// Word timing JSON destination
    pub export_json: Option<PathBuf>,
    /// Show the startup banner
    pub banner: bool,
}

impl SessionOptions {
    /// Options with every override unset
    pub fn new(lyric_file: impl Into<PathBuf>) -> Self {
        Self {
            lyric_file: lyric_file.into(),
            genre: None,
            realtime: false,
            offset: 0.0,
            start_time: None,
            speed_multiplier: 1.0,
            wrap_width: None,
            auto_close: None,
            export_json: None,
            banner: false,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Interrupted,
}

/// Main application controller for lyric playback
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with a validated configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve the requested genre, falling back to the configured default
    pub fn resolve_genre(&self, name: Option<&str>) -> Result<&GenreProfile, ConfigError> {
        self.config.genre(name.unwrap_or(self.config.default_genre.as_str()))
    }

    /// Run a full session: validate, load, export, play or list, tear down.
    ///
    /// Ctrl+C stops realtime playback and the teardown hold.
    pub async fn run(&self, options: &SessionOptions) -> Result<SessionOutcome> {
        self.run_until(options, wait_for_ctrl_c).await
    }

    /// Run a full session, stopping early when `interrupt` resolves.
    ///
    /// `interrupt` is called once per interruptible phase: realtime
    /// playback, then the teardown.
    pub async fn run_until<I, F>(&self, options: &SessionOptions, interrupt: I) -> Result<SessionOutcome>
    where
        I: Fn() -> F,
        F: Future<Output = ()>,
    {
        let genre = self.resolve_genre(options.genre.as_deref())?;
        let transform = PlaybackTransform::new(options.offset, options.start_time, options.speed_multiplier)?;

        if options.banner {
            terminal::print_banner();
        }
        let file_name = options
            .lyric_file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        terminal::animate_loading(&format!("Loading {}", file_name), self.config.loading_opening).await?;

        let collection = LyricCollection::load(&options.lyric_file)?;
        info!("Loaded {} lyric entries", collection.entries.len());
        debug!("Lyrics loaded from {:?}", collection.source_file);

        if let Some(path) = &options.export_json {
            WordTimingExport::from_entries(&collection.entries).write_json(path)?;
            println!("{}[OK] JSON exported to: {}{}", terminal::GREEN, path.display(), RESET);
        }

        let outcome = if options.realtime {
            self.play_until_interrupted(&collection.entries, genre, transform, options.wrap_width, &interrupt)
                .await?
        } else {
            let mut stdout = io::stdout().lock();
            schedule_printer::print_schedule(
                &collection.entries,
                &transform,
                self.config.start_offset_secs(),
                &mut stdout,
            )?;
            SessionOutcome::Completed
        };

        // The interrupt handler stays installed once playback has polled it,
        // so the teardown has to listen as well
        let outcome = tokio::select! {
            result = self.teardown(options) => {
                result?;
                outcome
            }
            _ = interrupt() => {
                debug!("Teardown interrupted");
                println!("{}", RESET);
                SessionOutcome::Interrupted
            }
        };
        Ok(outcome)
    }

    /// Realtime playback raced against `interrupt`.
    ///
    /// On interruption the playback future is dropped at its current sleep
    /// and the terminal style is reset.
    async fn play_until_interrupted<I, F>(
        &self,
        entries: &[TimedEntry],
        genre: &GenreProfile,
        transform: PlaybackTransform,
        wrap_width: Option<usize>,
        interrupt: &I,
    ) -> Result<SessionOutcome>
    where
        I: Fn() -> F,
        F: Future<Output = ()>,
    {
        let settings = PlaybackSettings::from_config(&self.config, wrap_width);
        let scheduler = RealtimeScheduler::new(genre, transform, settings);

        let mut clock = MonotonicClock::start();
        let mut rng = rand::rng();
        let mut stdout = io::stdout();
        let mut stage = Stage::new(&mut clock, &mut rng, &mut stdout);

        let outcome = tokio::select! {
            result = scheduler.play(entries, &mut stage) => {
                let report = result?;
                debug!(
                    "Playback finished: {} entries, {} lines",
                    report.entries.len(),
                    report.lines.len()
                );
                SessionOutcome::Completed
            }
            _ = interrupt() => SessionOutcome::Interrupted,
        };

        if outcome == SessionOutcome::Interrupted {
            warn!("Playback interrupted by user");
            let mut out = io::stdout();
            write!(out, "{}\n{}[!] Stopped by user (Ctrl+C).{}\n", RESET, YELLOW, RESET)?;
            out.flush()?;
        }

        Ok(outcome)
    }

    /// Completion bar, then hold the terminal for the auto-close delay
    async fn teardown(&self, options: &SessionOptions) -> Result<()> {
        terminal::animate_completion(self.config.loading_ending).await?;

        let hold = options.auto_close.unwrap_or(self.config.auto_close_seconds);
        if hold > 0.0 {
            debug!("Auto-closing in {:.1}s", hold);
            tokio::time::sleep(duration_from_secs(hold)).await;
        }
        Ok(())
    }
}

/// Resolves on Ctrl+C. When the handler cannot be installed the session
/// simply cannot be interrupted.
async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
