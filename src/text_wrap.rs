/*!
 * Line wrapping and lyric line styling.
 *
 * Greedy word wrap that respects explicit line breaks, plus the segmentation
 * used to render backing vocals: a line starting with `-` is dimmed as a
 * whole, otherwise every `(...)` span is dimmed in place.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHETICAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([^)]*\)").expect("valid parenthetical regex")
});

/// Wrap `text` to `width` characters.
///
/// Each explicit line is wrapped on its own. Lines that already fit are kept
/// verbatim, and a single word longer than `width` is emitted unsplit.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut wrapped = Vec::new();

    for line in text.split('\n') {
        if line.chars().count() <= width {
            wrapped.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;
        for word in line.split_whitespace() {
            let word_len = word.chars().count();
            let candidate_len = if current.is_empty() {
                word_len
            } else {
                current_len + 1 + word_len
            };

            if candidate_len <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_len = candidate_len;
            } else {
                if !current.is_empty() {
                    wrapped.push(std::mem::take(&mut current));
                }
                current.push_str(word);
                current_len = word_len;
            }
        }
        if !current.is_empty() {
            wrapped.push(current);
        }
    }

    wrapped
}

/// A piece of a rendered line and whether it is de-emphasized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    /// Text of the segment
    pub text: String,
    /// Rendered with the dimmed genre color
    pub dimmed: bool,
}

impl StyledSegment {
    fn new(text: &str, dimmed: bool) -> Self {
        Self {
            text: text.to_string(),
            dimmed,
        }
    }
}

/// Split a wrapped line into normal and dimmed segments, left to right.
///
/// Concatenating the segment texts always gives back `line`.
pub fn segment_line(line: &str) -> Vec<StyledSegment> {
    if line.trim().starts_with('-') {
        return vec![StyledSegment::new(line, true)];
    }

    let mut segments = Vec::new();
    let mut last = 0;
    for span in PARENTHETICAL_REGEX.find_iter(line) {
        if span.start() > last {
            segments.push(StyledSegment::new(&line[last..span.start()], false));
        }
        segments.push(StyledSegment::new(span.as_str(), true));
        last = span.end();
    }

    if segments.is_empty() {
        segments.push(StyledSegment::new(line, false));
    } else if last < line.len() {
        segments.push(StyledSegment::new(&line[last..], false));
    }

    segments
}
