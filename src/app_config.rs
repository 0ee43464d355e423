use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::path::Path;

use crate::effects::Effect;
use crate::errors::ConfigError;
use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the player configuration including loading,
/// merging with the built-in genres, validating and saving settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Maximum characters per rendered line
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,

    /// Pause in seconds after every rendered line
    #[serde(default = "default_margin_between_lines")]
    pub margin_between_lines: f64,

    /// Pause in seconds after every lyric block
    #[serde(default = "default_block_margin")]
    pub block_margin: f64,

    /// Seconds to keep the terminal open after the completion bar
    #[serde(default = "default_auto_close_seconds")]
    pub auto_close_seconds: f64,

    /// Opening loading bar duration in milliseconds
    #[serde(default = "default_loading_ms")]
    pub loading_opening: u64,

    /// Completion bar duration in milliseconds
    #[serde(default = "default_loading_ms")]
    pub loading_ending: u64,

    /// Minute component of the song position the lyric file starts at
    #[serde(default)]
    pub lrc_start_minute: u32,

    /// Second component of the song position the lyric file starts at
    #[serde(default)]
    pub lrc_start_second: u32,

    /// Print an elapsed-time readout before each block
    #[serde(default = "default_true")]
    pub show_time_display: bool,

    /// Genre used when none is given on the command line
    #[serde(default = "default_genre_name")]
    pub default_genre: String,

    /// Genre styling profiles by name
    #[serde(default = "default_genres")]
    pub genres: BTreeMap<String, GenreProfile>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Styling of a genre: color, typing speed and animation effect
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenreProfile {
    // @field: ANSI color escape sequence
    pub color: String,

    // @field: Base seconds per character
    pub speed: f64,

    // @field: Animation effect tag
    #[serde(default)]
    pub effect: Effect,

    // @field: Human readable description
    #[serde(default = "String::new")]
    pub description: String,
}

impl GenreProfile {
    // @returns: Genre profile
    pub fn new(color: &str, speed: f64, effect: Effect, description: &str) -> Self {
        Self {
            color: color.to_string(),
            speed,
            effect,
            description: description.to_string(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_wrap_width() -> usize {
    48
}

fn default_margin_between_lines() -> f64 {
    0.15
}

fn default_block_margin() -> f64 {
    0.4
}

fn default_auto_close_seconds() -> f64 {
    5.0
}

fn default_loading_ms() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_genre_name() -> String {
    "hiphop".to_string()
}

/// Built-in genre profiles
pub fn default_genres() -> BTreeMap<String, GenreProfile> {
    let builtin = [
        ("rnb_soul", "\x1b[95m", 0.035, Effect::SmoothFade, "R&B / Soul - smooth, warm, slow fade-in"),
        ("jazz", "\x1b[94m", 0.06, Effect::Swing, "Jazz - swing timing, subtle wander"),
        ("blues", "\x1b[34m", 0.055, Effect::Wave, "Blues - slow, mournful wave"),
        ("childrens", "\x1b[96m", 0.045, Effect::Bounce, "Children's - playful bounce and bright color"),
        ("classical", "\x1b[97m", 0.085, Effect::ElegantFade, "Classical - slow and stately"),
        ("country", "\x1b[33m", 0.05, Effect::Typewriter, "Country - clear typewriter style"),
        ("easy_listening", "\x1b[37m", 0.065, Effect::Smooth, "Easy Listening - mellow and unobtrusive"),
        ("electronic", "\x1b[96m", 0.01, Effect::Glitch, "Electronic - fast, glitchy, bright"),
        ("folk_world", "\x1b[92m", 0.05, Effect::Vibrate, "Folk / World - organic, gentle vibrato"),
        ("hiphop", "\x1b[93m", 0.012, Effect::Shake, "Hip Hop - smooth, rhythmic, punchy"),
        ("rap", "\x1b[91m", 0.008, Effect::HeavyShake, "Rap - fast, aggressive, intense"),
        ("holiday_religious", "\x1b[33m", 0.04, Effect::Glow, "Holiday / Religious - warm glow"),
        ("latin", "\x1b[91m", 0.035, Effect::Salsa, "Latin - rhythmic, lively"),
        ("pop", "\x1b[95m", 0.02, Effect::Bounce, "Pop - bright, per-word bounce"),
        ("reggae", "\x1b[92m", 0.045, Effect::ReggaeWave, "Reggae - laid-back, offbeat wave"),
        ("rock", "\x1b[31m", 0.013, Effect::HeavyShake, "Rock - aggressive, strong hits"),
        ("soundtrack_library", "\x1b[97m", 0.05, Effect::Cinematic, "Soundtrack / Library - cinematic, neutral"),
    ];

    builtin
        .into_iter()
        .map(|(name, color, speed, effect, description)| {
            (name.to_string(), GenreProfile::new(color, speed, effect, description))
        })
        .collect()
}

impl Config {
    /// Load the configuration from `path`, creating it with defaults when it
    /// does not exist. Genres from the file are merged over the built-ins.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !FileManager::file_exists(path) {
            warn!("Config file not found at {:?}, creating default config.", path);
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = FileManager::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        for (name, profile) in default_genres() {
            config.genres.entry(name).or_insert(profile);
        }

        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wrap_width == 0 {
            return Err(ConfigError::Invalid("wrap_width must be greater than 0".to_string()));
        }

        let durations = [
            ("margin_between_lines", self.margin_between_lines),
            ("block_margin", self.block_margin),
            ("auto_close_seconds", self.auto_close_seconds),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be >= 0 (got {})", name, value)));
            }
        }

        for (name, genre) in &self.genres {
            if !genre.speed.is_finite() || genre.speed <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "genre '{}' speed must be > 0 (got {})",
                    name, genre.speed
                )));
            }
        }

        Ok(())
    }

    /// Look up a genre by name (case-insensitive).
    ///
    /// An unknown name returns the full listing so it can be shown to the user.
    pub fn genre(&self, name: &str) -> Result<&GenreProfile, ConfigError> {
        let key = name.trim().to_lowercase();
        self.genres.get(&key).ok_or_else(|| ConfigError::UnknownGenre {
            name: key,
            available: self.genre_listing(),
        })
    }

    /// Every configured genre as `(name, description)`, sorted by name
    pub fn genre_listing(&self) -> Vec<(String, String)> {
        self.genres
            .iter()
            .map(|(name, genre)| (name.clone(), genre.description.clone()))
            .collect()
    }

    /// Song position of the first lyric line, in seconds
    pub fn start_offset_secs(&self) -> f64 {
        f64::from(self.lrc_start_minute) * 60.0 + f64::from(self.lrc_start_second)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            wrap_width: default_wrap_width(),
            margin_between_lines: default_margin_between_lines(),
            block_margin: default_block_margin(),
            auto_close_seconds: default_auto_close_seconds(),
            loading_opening: default_loading_ms(),
            loading_ending: default_loading_ms(),
            lrc_start_minute: 0,
            lrc_start_second: 0,
            show_time_display: true,
            default_genre: default_genre_name(),
            genres: default_genres(),
            log_level: LogLevel::default(),
        }
    }
}
