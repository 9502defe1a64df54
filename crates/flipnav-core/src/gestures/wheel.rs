//! Wheel flick recogniser.
//!
//! Trackpads and some mice keep emitting wheel events after the finger has
//! left the surface. Those momentum events arrive in quick succession, keep
//! their sign and shrink in magnitude, with the odd small uptick. This
//! detector keeps a short rolling history of samples and lets through only
//! the events that start a new gesture: the first event after a pause, a
//! change of sign, or a sample that outgrows the run it arrived in.

use crate::settings::WheelSettings;
use crate::types::NavigationDirection;
use std::collections::VecDeque;

/// One entry of the rolling wheel history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelDelta {
    pub delta: f64,
    pub timestamp_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelVerdict {
    Genuine,
    Inertial,
}

/// Per-handler wheel classifier. Owns its history exclusively.
#[derive(Clone, Debug)]
pub struct WheelGestureDetector {
    history: VecDeque<WheelDelta>,
    capacity: usize,
    inertia_gap_ms: u64,
    decay_tolerance: f64,
}

impl Default for WheelGestureDetector {
    fn default() -> Self {
        Self::new(WheelSettings::default())
    }
}

impl WheelGestureDetector {
    pub fn new(settings: WheelSettings) -> Self {
        let capacity = settings.history_size.max(2);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            inertia_gap_ms: settings.inertia_gap_ms,
            decay_tolerance: settings.decay_tolerance.max(0.0),
        }
    }

    /// Classifies one normalized wheel delta.
    ///
    /// Uses the legacy `wheelDelta` sign convention: a negative delta maps to
    /// [`NavigationDirection::Next`], a positive one to
    /// [`NavigationDirection::Prev`]. Zero and non-finite deltas carry no
    /// direction and are not recorded.
    pub fn classify(&mut self, delta: f64, timestamp_ms: u64) -> NavigationDirection {
        if !delta.is_finite() || delta == 0.0 {
            return NavigationDirection::None;
        }

        self.push(WheelDelta {
            delta,
            timestamp_ms,
        });

        match self.verdict() {
            WheelVerdict::Genuine => direction_for(delta),
            WheelVerdict::Inertial => {
                log::trace!("wheel delta {delta} at {timestamp_ms}ms classified as inertial");
                NavigationDirection::None
            }
        }
    }

    /// Samples currently held, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &WheelDelta> + '_ {
        self.history.iter()
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    fn push(&mut self, sample: WheelDelta) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(sample);
    }

    /// Judges the newest sample against the run of samples before it.
    ///
    /// The run is the contiguous stretch of history, newest first, that keeps
    /// the newest sample's sign and never pauses longer than the inertia gap.
    /// Momentum decays on average, so the newest sample only counts as a new
    /// flick when it outgrows the mean magnitude of that run.
    fn verdict(&self) -> WheelVerdict {
        let mut samples = self.history.iter().rev();
        let Some(newest) = samples.next() else {
            return WheelVerdict::Genuine;
        };

        let mut later = newest;
        let mut total = 0.0;
        let mut count = 0usize;
        for sample in samples {
            let gap = later.timestamp_ms.saturating_sub(sample.timestamp_ms);
            if gap > self.inertia_gap_ms || sample.delta.signum() != newest.delta.signum() {
                break;
            }
            total += sample.delta.abs();
            count += 1;
            later = sample;
        }

        if count == 0 {
            return WheelVerdict::Genuine;
        }

        let baseline = total / count as f64;
        if newest.delta.abs() > baseline * self.decay_tolerance {
            WheelVerdict::Genuine
        } else {
            WheelVerdict::Inertial
        }
    }
}

fn direction_for(delta: f64) -> NavigationDirection {
    if delta < 0.0 {
        NavigationDirection::Next
    } else {
        NavigationDirection::Prev
    }
}

#[cfg(test)]
#[path = "../tests/wheel_tests.rs"]
mod tests;
