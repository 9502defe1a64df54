//! Resolver configuration.

use crate::gesture_constants::{
    DECAY_TOLERANCE, INERTIA_GAP_MS, SWIPE_THRESHOLD_RATIO, WHEEL_HISTORY_SIZE,
};
use crate::types::{NavigationDirection, Orientation};
use std::rc::Rc;

/// A consumer navigation callback. Takes nothing, returns nothing.
pub type NavigationCallback = Rc<dyn Fn()>;

/// Tuning for the wheel inertia classifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelSettings {
    /// Samples kept in the rolling history window; bounds the run a new
    /// sample is compared against. Values below 2 are raised to 2.
    pub history_size: usize,
    /// Longest inter-arrival gap, in milliseconds, still treated as momentum.
    pub inertia_gap_ms: u64,
    /// Growth factor a sample may show over the mean of its run and still decay.
    pub decay_tolerance: f64,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            history_size: WHEEL_HISTORY_SIZE,
            inertia_gap_ms: INERTIA_GAP_MS,
            decay_tolerance: DECAY_TOLERANCE,
        }
    }
}

/// Configuration for gesture interpretation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSettings {
    /// Fraction of the viewport a swipe must exceed along its axis.
    pub swipe_threshold_ratio: f64,
    /// Wheel classifier tuning.
    pub wheel: WheelSettings,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            swipe_threshold_ratio: SWIPE_THRESHOLD_RATIO,
            wheel: WheelSettings::default(),
        }
    }
}

impl GestureSettings {
    pub fn with_swipe_threshold_ratio(mut self, ratio: f64) -> Self {
        self.swipe_threshold_ratio = ratio;
        self
    }

    pub fn with_wheel(mut self, wheel: WheelSettings) -> Self {
        self.wheel = wheel;
        self
    }
}

/// The consumer side of a resolver: two callbacks and an orientation.
/// Immutable once handed to the resolver.
#[derive(Clone)]
pub struct NavigationConfig {
    on_next: NavigationCallback,
    on_prev: NavigationCallback,
    orientation: Orientation,
}

impl NavigationConfig {
    pub fn new(
        on_next: impl Fn() + 'static,
        on_prev: impl Fn() + 'static,
        orientation: Orientation,
    ) -> Self {
        Self {
            on_next: Rc::new(on_next),
            on_prev: Rc::new(on_prev),
            orientation,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The callback for `direction`, or `None` for [`NavigationDirection::None`].
    pub fn callback_for(&self, direction: NavigationDirection) -> Option<NavigationCallback> {
        match direction {
            NavigationDirection::Next => Some(Rc::clone(&self.on_next)),
            NavigationDirection::Prev => Some(Rc::clone(&self.on_prev)),
            NavigationDirection::None => None,
        }
    }
}

impl std::fmt::Debug for NavigationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationConfig")
            .field("orientation", &self.orientation)
            .finish_non_exhaustive()
    }
}
