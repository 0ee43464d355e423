use crate::errors::PlaybackError;

// @module: Session-wide timing transform

/// Offset, start time and speed multiplier applied uniformly to all entries.
///
/// The speed multiplier divides both the relative entry timing and the
/// per-character typing delay, so schedule cadence and typing rate scale
/// together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackTransform {
    offset: f64,
    start_time: Option<f64>,
    speed_multiplier: f64,
}

impl PlaybackTransform {
    // @validates: speed multiplier is finite and > 0
    pub fn new(offset: f64, start_time: Option<f64>, speed_multiplier: f64) -> Result<Self, PlaybackError> {
        if !speed_multiplier.is_finite() || speed_multiplier <= 0.0 {
            return Err(PlaybackError::InvalidSpeedMultiplier(speed_multiplier));
        }

        Ok(Self {
            offset,
            start_time,
            speed_multiplier,
        })
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Seconds from the first entry to `start`, scaled by the speed multiplier
    pub fn relative(&self, start: f64, first_start: f64) -> f64 {
        (start - first_start) / self.speed_multiplier
    }

    /// Session time at which an entry starting at `start` is due
    pub fn absolute(&self, start: f64, first_start: f64) -> f64 {
        self.start_time.unwrap_or(0.0) + self.relative(start, first_start) + self.offset
    }

    /// Per-character delay after applying the speed multiplier
    pub fn char_delay(&self, base_speed: f64) -> f64 {
        base_speed / self.speed_multiplier
    }
}

impl Default for PlaybackTransform {
    fn default() -> Self {
        Self {
            offset: 0.0,
            start_time: None,
            speed_multiplier: 1.0,
        }
    }
}
