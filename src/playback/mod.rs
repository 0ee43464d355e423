/*!
 * Realtime lyric playback.
 *
 * This module contains:
 * - `clock`: the monotonic time source a session is measured against
 * - `transform`: offset / start / speed reshaping of entry timings
 * - `animator`: per-character emission with the typing cursor
 * - `scheduler`: the wall-clock synchronized playback loop
 */

pub mod clock;
pub mod transform;
pub mod animator;
pub mod scheduler;

pub use clock::{Clock, MonotonicClock, VirtualClock};
pub use transform::PlaybackTransform;
pub use animator::{Animator, Stage};
pub use scheduler::{PlaybackReport, PlaybackSettings, RealtimeScheduler};
