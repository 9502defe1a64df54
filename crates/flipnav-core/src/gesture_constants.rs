//! Shared gesture constants for wheel and touch navigation.
//!
//! Rate limiting windows are fixed for every handler. The classifier and
//! swipe thresholds are defaults for [`GestureSettings`](crate::GestureSettings).

/// Leading-edge throttle window applied to every dispatched direction.
///
/// Once a direction has been dispatched, further attempts within this window
/// are dropped, not queued.
pub const THROTTLE_WINDOW_MS: u64 = 200;

/// Trailing debounce quiet period for touch-move evaluation.
///
/// Only the last move sample of a burst is evaluated, once no further move
/// has arrived for this long.
pub const DEBOUNCE_QUIET_MS: u64 = 100;

/// Number of wheel samples kept by each wheel detector.
pub const WHEEL_HISTORY_SIZE: usize = 7;

/// Longest gap between wheel samples that still counts as one momentum run.
///
/// A sample arriving later than this after its predecessor starts a new
/// session and is always treated as a genuine flick.
pub const INERTIA_GAP_MS: u64 = 150;

/// Factor by which a wheel sample may exceed the mean magnitude of the run
/// before it and still count as decaying momentum.
pub const DECAY_TOLERANCE: f64 = 1.0;

/// Multiplier applied to `deltaY` and `detail` so they share the sign and
/// rough scale of the legacy `wheelDelta` property.
pub const LEGACY_DELTA_SCALE: f64 = -40.0;

/// Fraction of the viewport a swipe must cover along its axis.
pub const SWIPE_THRESHOLD_RATIO: f64 = 0.05;
