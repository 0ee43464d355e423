/*!
 * Per-word timing export.
 *
 * Word timings are derived by splitting each entry's duration evenly
 * across its whitespace-separated words. The result is a pure function of
 * the entries and serializes to the JSON layout consumed by caption tools:
 *
 * ```json
 * { "words": [ {word, start, end, start_time, end_time} ],
 *   "captions": [ {start, end, start_time, end_time, text, words: [...]} ] }
 * ```
 */

use std::path::Path;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;
use crate::lyrics_processor::TimedEntry;
use crate::timecode::format_seconds;

/// Shortest duration divided between words, in seconds
const MIN_CAPTION_DURATION_SECS: f64 = 0.0001;

/// Timing of a single word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub start_time: String,
    pub end_time: String,
}

/// Timing of one lyric entry and its words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTiming {
    pub start: f64,
    pub end: f64,
    pub start_time: String,
    pub end_time: String,
    pub text: String,
    pub words: Vec<WordTiming>,
}

/// Flat word list plus per-caption structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordTimingExport {
    pub words: Vec<WordTiming>,
    pub captions: Vec<CaptionTiming>,
}

impl WordTimingExport {
    /// Derive word timings for every entry.
    pub fn from_entries(entries: &[TimedEntry]) -> Self {
        let mut export = WordTimingExport::default();

        for entry in entries {
            let words = split_caption(entry);
            export.words.extend(words.iter().cloned());
            export.captions.push(CaptionTiming {
                start: entry.start,
                end: entry.end,
                start_time: format_seconds(entry.start),
                end_time: format_seconds(entry.end),
                text: entry.text.clone(),
                words,
            });
        }

        export
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize word timings")
    }

    /// Write the export to `path` as JSON
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        FileManager::write_to_file(path, &self.to_json()?)?;
        info!("Word timings exported to {:?} ({} words)", path, self.words.len());
        Ok(())
    }
}

/// Evenly subdivide an entry's duration across its words
fn split_caption(entry: &TimedEntry) -> Vec<WordTiming> {
    let words: Vec<&str> = entry.text.split_whitespace().collect();
    let duration = entry.duration().max(MIN_CAPTION_DURATION_SECS);
    let step = if words.is_empty() { duration } else { duration / words.len() as f64 };

    words
        .into_iter()
        .enumerate()
        .map(|(k, word)| {
            let start = entry.start + k as f64 * step;
            let end = start + step;
            WordTiming {
                word: word.to_string(),
                start,
                end,
                start_time: format_seconds(start),
                end_time: format_seconds(end),
            }
        })
        .collect()
}
