// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use lyricplay::app_config::{Config, LogLevel};
use lyricplay::app_controller::{Controller, SessionOptions};
use lyricplay::errors::{AppError, ConfigError};
use lyricplay::terminal::{RED, RESET, YELLOW};
use lyricplay::timecode;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for lyricplay
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// lyricplay - synchronized lyric player for the terminal
///
/// Plays LRC lyric files with per-genre animation, either in realtime or
/// as a static schedule listing.
#[derive(Parser, Debug)]
#[command(name = "lyricplay")]
#[command(version)]
#[command(about = "Terminal lyric player for LRC files")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "lyricplay renders LRC lyric files to the terminal with genre-specific animation.

EXAMPLES:
    lyricplay song.lrc                          # Print the schedule with the default genre
    lyricplay song.lrc jazz --realtime          # Animated playback in sync with the timestamps
    lyricplay song.lrc rap --realtime --speed 1.5
    lyricplay song.lrc --offset 2.5 --start 0:10.00
    lyricplay song.lrc --export-json words.json # Export per-word timings
    lyricplay completions bash > lyricplay.bash

CONFIGURATION:
    Settings and genres are stored in lyricplay.json by default. You can
    specify a different file with --config. If the file doesn't exist, a
    default one will be created automatically.

TIME VALUES:
    --offset and --start accept seconds (2.5, -1) or M:SS.ff (1:05.50).")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// LRC lyric file to play
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Genre used for the animation (default: from config)
    #[arg(value_name = "GENRE")]
    genre: Option<String>,

    /// Synchronize output with the lyric timestamps
    #[arg(short, long)]
    realtime: bool,

    /// Time offset (seconds or mm:ss.ff)
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<String>,

    /// Start time (seconds or mm:ss.ff)
    #[arg(long, allow_hyphen_values = true)]
    start: Option<String>,

    /// Override the configured wrap width
    #[arg(short, long)]
    wrap_width: Option<usize>,

    /// Override the configured auto-close delay in seconds
    #[arg(long)]
    auto_close: Option<f64>,

    /// Export per-word timings to a JSON file
    #[arg(long, value_name = "PATH")]
    export_json: Option<PathBuf>,

    /// Multiplier for both typing speed and lyric timing (1.0 = normal)
    #[arg(short, long, default_value_t = 1.0, allow_hyphen_values = true)]
    speed: f64,

    /// Display the banner at startup
    #[arg(short, long)]
    banner: bool,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "lyricplay.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Logger writing colored records to stderr
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Warn);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "lyricplay", &mut std::io::stdout());
        return Ok(());
    }

    if let Err(err) = run(cli).await {
        let app_error = AppError::from(err);
        report_failure(&app_error);
        return Err(app_error.into());
    }
    Ok(())
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    let lyric_file = cli.file.clone().ok_or_else(|| {
        anyhow!("FILE is required when no subcommand is specified")
    })?;

    if let Some(level) = &cli.log_level {
        log::set_max_level(LogLevel::from(level.clone()).to_level_filter());
    }

    let config = Config::load_or_create(&cli.config_path)?;

    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let options = SessionOptions {
        lyric_file,
        genre: cli.genre.clone(),
        realtime: cli.realtime,
        offset: cli.offset.as_deref().map(timecode::parse_timestamp).transpose()?.unwrap_or(0.0),
        start_time: cli.start.as_deref().map(timecode::parse_timestamp).transpose()?,
        speed_multiplier: cli.speed,
        wrap_width: cli.wrap_width,
        auto_close: cli.auto_close,
        export_json: cli.export_json.clone(),
        banner: cli.banner,
    };

    let controller = Controller::with_config(config)?;
    controller.run(&options).await?;
    Ok(())
}

// @reports: Unknown genres with the available listing; other errors are left to the caller
fn report_failure(error: &AppError) {
    if let AppError::Config(ConfigError::UnknownGenre { name, available }) = error {
        println!("{}[ERROR] Genre '{}' not found.{}\n", RED, name, RESET);
        println!("{}Available genres:{}", YELLOW, RESET);
        for (genre, description) in available {
            println!("  {:20} - {}", genre, description);
        }
    }
}
