use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};
use crate::errors::LyricError;
use crate::timecode;

// @module: Lyric file parsing

// @const: Bracketed LRC timestamp, 1-2 digit minutes, 2-3 digit fraction
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d{1,2}):(\d{2})\.(\d{2,3})\]").expect("valid timestamp regex")
});

// @const: Metadata tag lines such as [ti:...] or [offset:...]
static METADATA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[(ti|ar|al|by|offset|re|title|artist|album):").expect("valid metadata regex")
});

/// Placeholder duration given to every entry before end times are finalized
const PLACEHOLDER_DURATION_SECS: f64 = 3.0;

/// Shortest duration estimated for the final entry
const MIN_LAST_ENTRY_SECS: f64 = 2.0;

/// Seconds per character used to estimate the final entry's duration
const LAST_ENTRY_SECS_PER_CHAR: f64 = 0.1;

// @struct: Single timed lyric entry
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEntry {
    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Lyric text, may contain embedded newlines
    pub text: String,
}

impl TimedEntry {
    /// Creates a new timed entry
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        TimedEntry {
            start,
            end,
            text: text.into(),
        }
    }

    /// Duration of the entry in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Ordered lyric entries together with their source file
#[derive(Debug)]
pub struct LyricCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// Entries sorted by start time
    pub entries: Vec<TimedEntry>,
}

impl LyricCollection {
    /// Load and parse a lyric file.
    ///
    /// Fails when the file cannot be read or when it holds no timestamped lines.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LyricError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LyricError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let entries = Self::parse_lrc_string(&content)?;
        if entries.is_empty() {
            return Err(LyricError::Empty(path.to_path_buf()));
        }

        debug!("Loaded {} lyric entries from {:?}", entries.len(), path);

        Ok(LyricCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Parse LRC content into entries sorted by start time.
    ///
    /// Empty or timestamp-free input yields an empty list; callers decide
    /// whether that is an error.
    pub fn parse_lrc_string(content: &str) -> Result<Vec<TimedEntry>, LyricError> {
        let mut entries: Vec<TimedEntry> = Vec::new();

        for (line_idx, raw_line) in content.trim().lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || METADATA_REGEX.is_match(line) {
                continue;
            }

            let text = TIMESTAMP_REGEX.replace_all(line, "").trim().to_string();
            let mut starts = Vec::new();
            for stamp in TIMESTAMP_REGEX.find_iter(line) {
                starts.push(timecode::parse_timestamp(stamp.as_str())?);
            }

            if starts.is_empty() {
                // Continuation of the most recently added entry
                match entries.last_mut() {
                    Some(last) if !text.is_empty() => {
                        last.text.push('\n');
                        last.text.push_str(&text);
                    }
                    Some(_) => {}
                    None => warn!("Discarding line {} before the first timestamp: {}", line_idx + 1, line),
                }
                continue;
            }

            for start in starts {
                entries.push(TimedEntry::new(start, start + PLACEHOLDER_DURATION_SECS, text.clone()));
            }
        }

        // Stable, so repeated timestamps keep their file order
        entries.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self::finalize_end_times(&mut entries);

        Ok(entries)
    }

    /// Chain end times: every entry ends where the next one starts, and the
    /// last entry gets a duration estimated from its text length.
    fn finalize_end_times(entries: &mut [TimedEntry]) {
        for i in 0..entries.len().saturating_sub(1) {
            entries[i].end = entries[i + 1].start;
        }

        if let Some(last) = entries.last_mut() {
            let estimated = (last.text.chars().count() as f64 * LAST_ENTRY_SECS_PER_CHAR)
                .max(MIN_LAST_ENTRY_SECS);
            last.end = last.start + estimated;
        }
    }

    /// Start time of the first entry, if any
    pub fn first_start(&self) -> Option<f64> {
        self.entries.first().map(|e| e.start)
    }
}
