/*!
 * Per-character animation effects.
 *
 * Each genre names an effect. An effect decides how a character is drawn
 * (plain, double-struck, or preceded by a glitch symbol) and how long to
 * wait after it. Random effects draw from a caller-supplied `Rng` so a
 * seeded generator can be injected in tests.
 */

use std::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Symbols flashed before a character by the glitch effect
pub const GLITCH_SYMBOLS: [char; 8] = ['!', '@', '#', '$', '%', '^', '&', '*'];

/// Backspace, used to overstrike the previous character
const BACKSPACE: char = '\u{8}';

/// Animation effect attached to a genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Effect {
    SmoothFade,
    Swing,
    Wave,
    Bounce,
    ElegantFade,
    Typewriter,
    Smooth,
    Glitch,
    Vibrate,
    Glow,
    Salsa,
    ReggaeWave,
    Cinematic,
    Shake,
    HeavyShake,
    /// Any unrecognized tag: characters unchanged, base delay
    #[default]
    Plain,
}

impl Effect {
    /// Resolve an effect tag. Unknown tags resolve to [`Effect::Plain`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "smooth_fade" => Self::SmoothFade,
            "swing" => Self::Swing,
            "wave" => Self::Wave,
            "bounce" => Self::Bounce,
            "elegant_fade" => Self::ElegantFade,
            "typewriter" => Self::Typewriter,
            "smooth" => Self::Smooth,
            "glitch" => Self::Glitch,
            "vibrate" => Self::Vibrate,
            "glow" => Self::Glow,
            "salsa" => Self::Salsa,
            "reggae_wave" => Self::ReggaeWave,
            "cinematic" => Self::Cinematic,
            "shake" => Self::Shake,
            "heavy_shake" => Self::HeavyShake,
            _ => Self::Plain,
        }
    }

    /// The configuration tag of this effect
    pub fn tag(&self) -> &'static str {
        match self {
            Self::SmoothFade => "smooth_fade",
            Self::Swing => "swing",
            Self::Wave => "wave",
            Self::Bounce => "bounce",
            Self::ElegantFade => "elegant_fade",
            Self::Typewriter => "typewriter",
            Self::Smooth => "smooth",
            Self::Glitch => "glitch",
            Self::Vibrate => "vibrate",
            Self::Glow => "glow",
            Self::Salsa => "salsa",
            Self::ReggaeWave => "reggae_wave",
            Self::Cinematic => "cinematic",
            Self::Shake => "shake",
            Self::HeavyShake => "heavy_shake",
            Self::Plain => "plain",
        }
    }

    /// Render unit for the character at 0-based `index`.
    pub fn transform<R: Rng>(&self, ch: char, index: usize, rng: &mut R) -> String {
        match self {
            Self::Shake | Self::HeavyShake if index % 3 == 0 => double_strike(ch),
            Self::Vibrate if index % 4 == 0 => double_strike(ch),
            Self::Glitch if index % 5 == 0 => {
                let symbol = GLITCH_SYMBOLS[rng.random_range(0..GLITCH_SYMBOLS.len())];
                [symbol, BACKSPACE, ch].iter().collect()
            }
            _ => ch.to_string(),
        }
    }

    /// Delay in seconds after the character at 0-based `index`.
    pub fn delay<R: Rng>(&self, base_speed: f64, index: usize, rng: &mut R) -> f64 {
        let i = index as f64;
        match self {
            Self::Bounce => base_speed * rng.random_range(0.8..=1.2),
            Self::Wave => base_speed * (1.0 + 0.3 * (i * 0.5).sin()),
            Self::Swing => base_speed * (1.0 + 0.2 * (i * 0.3).sin()),
            Self::Shake | Self::HeavyShake if index % 3 == 0 => base_speed * 0.5,
            Self::Glitch => base_speed * rng.random_range(0.5..=1.5),
            Self::Vibrate => base_speed * (1.0 + 0.15 * (i * 0.7).sin()),
            Self::Salsa => base_speed * (1.0 + 0.25 * (i * 0.4).sin()),
            Self::ReggaeWave => base_speed * (1.0 + 0.2 * (i * 0.35 + 0.5).sin()),
            _ => base_speed,
        }
    }
}

fn double_strike(ch: char) -> String {
    [ch, BACKSPACE, ch].iter().collect()
}

impl From<String> for Effect {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Effect> for String {
    fn from(effect: Effect) -> Self {
        effect.tag().to_string()
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
