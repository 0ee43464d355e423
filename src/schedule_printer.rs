use std::io::{self, Write};

use crate::lyrics_processor::TimedEntry;
use crate::playback::PlaybackTransform;
use crate::terminal::{RESET, YELLOW};
use crate::timecode::{format_clock, format_seconds};

// @module: Static listing of transformed lyric timestamps

/// An entry with its start and end after the session transform
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEntry {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Apply `transform` to every entry, exactly as realtime playback targets them
pub fn build_schedule(entries: &[TimedEntry], transform: &PlaybackTransform) -> Vec<ScheduledEntry> {
    let Some(first) = entries.first() else {
        return Vec::new();
    };

    entries
        .iter()
        .map(|entry| ScheduledEntry {
            start: transform.absolute(entry.start, first.start),
            end: transform.absolute(entry.end, first.start),
            text: entry.text.clone(),
        })
        .collect()
}

/// Print the schedule listing and return the entries it shows.
///
/// `start_offset` is the configured song position added to the `MM:SS` readout.
pub fn print_schedule<W: Write>(
    entries: &[TimedEntry],
    transform: &PlaybackTransform,
    start_offset: f64,
    out: &mut W,
) -> io::Result<Vec<ScheduledEntry>> {
    let schedule = build_schedule(entries, transform);

    writeln!(out, "\n{}=== LYRIC SCHEDULE ==={}\n", YELLOW, RESET)?;
    if transform.speed_multiplier() != 1.0 {
        writeln!(out, "{}Speed multiplier: {}x{}\n", YELLOW, transform.speed_multiplier(), RESET)?;
    }

    for item in &schedule {
        writeln!(
            out,
            "[{}] ({})",
            format_seconds(item.start),
            format_clock(item.start, start_offset)
        )?;
        for line in item.text.split('\n') {
            writeln!(out, "  {}", line)?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    Ok(schedule)
}
