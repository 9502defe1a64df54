//! Swipe recogniser for touch and pen input.

use crate::normalize::{is_real_touch, normalize_point};
use crate::types::{NavigationDirection, Orientation, Point, PointerSample, Viewport};

/// Start and latest position of the touch sequence in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    pub start: Point,
    pub current: Point,
    started: bool,
}

impl GestureState {
    fn begin(point: Point) -> Self {
        Self {
            start: point,
            current: point,
            started: true,
        }
    }

    /// Whether a genuine touch start has been recorded.
    pub fn is_started(&self) -> bool {
        self.started
    }
}

/// Turns a drag into a direction once it covers enough of the viewport along
/// the configured axis.
#[derive(Clone, Debug)]
pub struct TouchGestureDetector {
    orientation: Orientation,
    threshold_ratio: f64,
    state: GestureState,
}

impl TouchGestureDetector {
    pub fn new(orientation: Orientation, threshold_ratio: f64) -> Self {
        Self {
            orientation,
            threshold_ratio,
            state: GestureState::default(),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Starts a new sequence at `point`, discarding the previous one.
    pub fn on_start(&mut self, point: Point) {
        self.state = GestureState::begin(point);
    }

    /// Records `point` as the current position and evaluates the drag.
    pub fn on_move(&mut self, point: Point, viewport: Viewport) -> NavigationDirection {
        self.track(point);
        self.evaluate(viewport)
    }

    /// Starts a sequence from a raw sample. Mouse pointers and samples
    /// without usable coordinates are ignored; returns whether the start was
    /// accepted.
    pub fn begin_sample(&mut self, sample: &PointerSample, touch_capable: bool) -> bool {
        if !is_real_touch(sample) {
            return false;
        }
        match normalize_point(sample, touch_capable) {
            Some(point) => {
                self.on_start(point);
                true
            }
            None => false,
        }
    }

    /// Updates the current position from a raw sample without evaluating.
    pub fn track_sample(&mut self, sample: &PointerSample, touch_capable: bool) -> bool {
        if !is_real_touch(sample) {
            return false;
        }
        match normalize_point(sample, touch_capable) {
            Some(point) => {
                self.track(point);
                true
            }
            None => false,
        }
    }

    pub fn track(&mut self, point: Point) {
        self.state.current = point;
    }

    /// Direction of the drag so far, or `None` when it is too short, runs
    /// along the wrong axis, or no genuine start was recorded.
    pub fn evaluate(&self, viewport: Viewport) -> NavigationDirection {
        if !self.state.started {
            return NavigationDirection::None;
        }

        let GestureState { start, current, .. } = self.state;
        let dx = (start.x - current.x).abs();
        let dy = (start.y - current.y).abs();

        match self.orientation {
            Orientation::Horizontal => {
                let threshold = viewport.width * self.threshold_ratio;
                if dx > dy && dx > threshold {
                    forward_if(start.x > current.x)
                } else {
                    NavigationDirection::None
                }
            }
            Orientation::Vertical => {
                let threshold = viewport.height * self.threshold_ratio;
                if dy >= dx && dy > threshold {
                    forward_if(start.y > current.y)
                } else {
                    NavigationDirection::None
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }
}

fn forward_if(forward: bool) -> NavigationDirection {
    if forward {
        NavigationDirection::Next
    } else {
        NavigationDirection::Prev
    }
}

#[cfg(test)]
#[path = "../tests/touch_tests.rs"]
mod tests;
