/*!
 * LRC timestamp conversion.
 *
 * Converts between the textual `MM:SS.cc` timestamp format used by LRC
 * files and floating-point seconds, in both directions.
 */

use crate::errors::TimecodeError;

/// Parse an LRC timestamp or a bare number of seconds.
///
/// Accepted shapes (surrounding brackets and whitespace are ignored):
/// - `M:SS.ff` / `MM:SS.ff` where `ff` is centiseconds
/// - `M:SS.fff` / `MM:SS.fff` where `fff` is milliseconds
/// - `M:SS` whole seconds
/// - `12.5`, `-1.5` raw seconds
pub fn parse_timestamp(text: &str) -> Result<f64, TimecodeError> {
    let token = text.trim().trim_matches(|c| c == '[' || c == ']').trim();
    if token.is_empty() {
        return Err(TimecodeError::Malformed(text.to_string()));
    }

    let Some((minutes_part, seconds_part)) = token.split_once(':') else {
        return parse_number::<f64>(text, token);
    };

    let minutes: u64 = parse_number(text, minutes_part)?;
    let (seconds, fraction) = match seconds_part.split_once('.') {
        Some((secs, frac)) => {
            let secs: u64 = parse_number(text, secs)?;
            let frac_value: u64 = parse_number(text, frac)?;
            let fraction = match frac.len() {
                2 => frac_value as f64 / 100.0,
                3 => frac_value as f64 / 1000.0,
                _ => return Err(TimecodeError::Malformed(text.to_string())),
            };
            (secs, fraction)
        }
        None => (parse_number(text, seconds_part)?, 0.0),
    };

    Ok((minutes * 60 + seconds) as f64 + fraction)
}

/// Format seconds as `MM:SS.cc`.
///
/// Negative input clamps to zero. Centiseconds that round up to 100 roll
/// over into seconds, which roll over into minutes.
pub fn format_seconds(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 { seconds } else { 0.0 };

    let mut minutes = (seconds / 60.0).floor() as u64;
    let mut secs = (seconds % 60.0).floor() as u64;
    let mut centis = ((seconds - seconds.trunc()) * 100.0).round() as u64;

    if centis >= 100 {
        secs += 1;
        centis = 0;
        if secs >= 60 {
            minutes += 1;
            secs = 0;
        }
    }

    format!("{:02}:{:02}.{:02}", minutes, secs, centis)
}

/// Format an elapsed-time readout as `MM:SS` with no sub-second digits.
///
/// `start_offset` is the configured song start position in seconds.
pub fn format_clock(seconds: f64, start_offset: f64) -> String {
    let total = seconds + start_offset;
    let total = if total.is_finite() && total > 0.0 { total } else { 0.0 };
    let minutes = (total / 60.0).floor() as u64;
    let secs = (total % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, secs)
}

fn parse_number<T: std::str::FromStr>(token: &str, value: &str) -> Result<T, TimecodeError> {
    value.trim().parse::<T>().map_err(|_| TimecodeError::InvalidNumber {
        token: token.to_string(),
        value: value.to_string(),
    })
}
