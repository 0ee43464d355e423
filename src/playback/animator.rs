/*!
 * Character-by-character text emission.
 *
 * After every character but the last a rotating cursor glyph is drawn,
 * held briefly and erased again, which gives the "live typing" look. Each
 * call leaves the terminal with no cursor glyph and the style reset.
 */

use std::io::Write;
use rand::Rng;

use crate::effects::Effect;
use crate::errors::PlaybackError;
use crate::playback::clock::{duration_from_secs, Clock};
use crate::terminal::{BOLD, RESET};

/// Cursor glyphs, cycled one step per flash
pub const CURSOR_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Shortest time a cursor glyph stays visible
const MIN_CURSOR_HOLD_SECS: f64 = 0.06;

/// Cursor hold as a fraction of the character delay
const CURSOR_HOLD_RATIO: f64 = 0.4;

/// Backspace, space, backspace: erases the glyph left of the cursor
pub const ERASE_GLYPH: &str = "\u{8} \u{8}";

/// The output stream, clock and random source a session renders with
pub struct Stage<'a, C, R, W> {
    pub clock: &'a mut C,
    pub rng: &'a mut R,
    pub out: &'a mut W,
}

impl<'a, C: Clock, R: Rng, W: Write> Stage<'a, C, R, W> {
    pub fn new(clock: &'a mut C, rng: &'a mut R, out: &'a mut W) -> Self {
        Self { clock, rng, out }
    }

    /// Write and flush so each unit reaches the terminal immediately
    pub fn emit(&mut self, text: &str) -> Result<(), PlaybackError> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Sleep for `seconds`; non-positive pauses are skipped
    pub async fn pause(&mut self, seconds: f64) {
        if seconds > 0.0 {
            self.clock.sleep(duration_from_secs(seconds)).await;
        }
    }
}

/// Types text with a genre effect
#[derive(Debug, Clone, Copy)]
pub struct Animator {
    effect: Effect,
}

impl Animator {
    pub fn new(effect: Effect) -> Self {
        Self { effect }
    }

    /// Type `text` in `color`, waiting the effect delay derived from
    /// `speed` after each character.
    pub async fn animate<C: Clock, R: Rng, W: Write>(
        &self,
        stage: &mut Stage<'_, C, R, W>,
        text: &str,
        color: &str,
        speed: f64,
    ) -> Result<(), PlaybackError> {
        stage.emit(color)?;

        let chars: Vec<char> = text.chars().collect();
        let last = chars.len().saturating_sub(1);
        let mut frame = 0;

        for (i, &ch) in chars.iter().enumerate() {
            let unit = self.effect.transform(ch, i, stage.rng);
            let delay = self.effect.delay(speed, i, stage.rng);
            stage.emit(&unit)?;

            if i < last {
                frame += 1;
                Self::flash_cursor(stage, frame, color, delay).await?;
            }

            stage.pause(delay).await;

            if ch == '\n' && i < last {
                frame += 1;
                Self::flash_cursor(stage, frame, color, delay).await?;
            }
        }

        // Overwrite any leftover glyph, then drop the color
        stage.emit(" \u{8}")?;
        stage.emit(RESET)?;
        Ok(())
    }

    async fn flash_cursor<C: Clock, R: Rng, W: Write>(
        stage: &mut Stage<'_, C, R, W>,
        frame: usize,
        color: &str,
        delay: f64,
    ) -> Result<(), PlaybackError> {
        let glyph = CURSOR_FRAMES[frame % CURSOR_FRAMES.len()];
        stage.emit(&format!("{}{}{}{}", BOLD, color, glyph, RESET))?;
        stage.pause((delay * CURSOR_HOLD_RATIO).max(MIN_CURSOR_HOLD_SECS)).await;
        stage.emit(ERASE_GLYPH)?;
        stage.emit(color)
    }
}
