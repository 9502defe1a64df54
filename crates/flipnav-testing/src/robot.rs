//! Robot-style driver for end-to-end resolver tests.
//!
//! A [`GestureRobot`] owns a resolver built on a [`TestHost`] and counts how
//! often each callback fires. Input goes through the recording event source,
//! exactly as a browser would deliver it.
//!
//! # Example
//!
//! ```
//! use flipnav_core::Orientation;
//! use flipnav_testing::{FakeEnvironment, GestureRobot};
//!
//! let robot = GestureRobot::new(Orientation::Horizontal, FakeEnvironment::phone());
//! robot.swipe((500.0, 300.0), (300.0, 300.0));
//! assert_eq!(robot.next_count(), 1);
//! ```

use crate::host::{FakeEnvironment, TestHost};
use flipnav_core::{
    GestureDirectionResolver, GestureSettings, InputEvent, ListenerSlot, NavigationConfig,
    NavigationDirection, Orientation, Point, PointerKind, PointerSample, WheelSample,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Gap between consecutive move samples of a synthetic swipe.
pub const SWIPE_STEP_MS: u64 = 16;

/// Samples a synthetic swipe is split into.
pub const SWIPE_STEPS: usize = 5;

pub struct GestureRobot {
    host: TestHost,
    resolver: GestureDirectionResolver,
    log: Rc<RefCell<Vec<NavigationDirection>>>,
}

impl GestureRobot {
    pub fn new(orientation: Orientation, environment: FakeEnvironment) -> Self {
        Self::with_host(orientation, GestureSettings::default(), TestHost::new(environment))
    }

    pub fn with_host(orientation: Orientation, settings: GestureSettings, host: TestHost) -> Self {
        let log = Rc::new(RefCell::new(Vec::new()));
        let next_log = Rc::clone(&log);
        let prev_log = Rc::clone(&log);
        let config = NavigationConfig::new(
            move || next_log.borrow_mut().push(NavigationDirection::Next),
            move || prev_log.borrow_mut().push(NavigationDirection::Prev),
            orientation,
        );
        let resolver = GestureDirectionResolver::new(config, settings, host.host());
        Self {
            host,
            resolver,
            log,
        }
    }

    pub fn host(&self) -> &TestHost {
        &self.host
    }

    pub fn resolver(&self) -> &GestureDirectionResolver {
        &self.resolver
    }

    /// Every dispatched direction, in order.
    pub fn dispatched(&self) -> Vec<NavigationDirection> {
        self.log.borrow().clone()
    }

    pub fn next_count(&self) -> usize {
        self.count(NavigationDirection::Next)
    }

    pub fn prev_count(&self) -> usize {
        self.count(NavigationDirection::Prev)
    }

    fn count(&self, direction: NavigationDirection) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|dispatched| **dispatched == direction)
            .count()
    }

    /// Moves virtual time, running any debounced evaluation that falls due.
    pub fn advance(&self, delta_ms: u64) {
        log::trace!("robot: advance {delta_ms}ms");
        self.host.scheduler.advance(delta_ms);
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.resolver.set_disabled(disabled);
    }

    pub fn teardown(&self) {
        self.resolver.teardown();
    }

    /// Emits a standard `wheel` event with the given `deltaY`. Returns how
    /// many listeners received it.
    pub fn wheel(&self, delta_y: f64) -> usize {
        self.emit_wheel(WheelSample::from_delta_y(delta_y))
    }

    /// Emits a raw wheel sample on whichever wheel event name is bound.
    pub fn emit_wheel(&self, sample: WheelSample) -> usize {
        match self.bound_name(ListenerSlot::Wheel) {
            Some(name) => {
                log::trace!("robot: `{name}` {sample:?}");
                self.host.source.emit(name, InputEvent::Wheel(sample))
            }
            None => {
                log::trace!("robot: no wheel listener bound, dropping {sample:?}");
                0
            }
        }
    }

    pub fn touch_start(&self, x: f64, y: f64) -> usize {
        self.emit_pointer(ListenerSlot::TouchStart, finger(x, y))
    }

    pub fn touch_move(&self, x: f64, y: f64) -> usize {
        self.emit_pointer(ListenerSlot::TouchMove, finger(x, y))
    }

    /// Emits a raw sample on the bound touch start or move event.
    pub fn emit_pointer(&self, slot: ListenerSlot, sample: PointerSample) -> usize {
        let event = match slot {
            ListenerSlot::TouchStart => InputEvent::TouchStart(sample),
            ListenerSlot::TouchMove => InputEvent::TouchMove(sample),
            ListenerSlot::Wheel => return 0,
        };
        match self.bound_name(slot) {
            Some(name) => {
                log::trace!("robot: `{name}` {event:?}");
                self.host.source.emit(name, event)
            }
            None => {
                log::trace!("robot: no {slot:?} listener bound, dropping {event:?}");
                0
            }
        }
    }

    /// Drags a finger from `from` to `to` in [`SWIPE_STEPS`] moves, then waits
    /// long enough for the debounced evaluation to run.
    pub fn swipe(&self, from: (f64, f64), to: (f64, f64)) {
        self.drag(from, to);
        self.advance(flipnav_core::gesture_constants::DEBOUNCE_QUIET_MS);
    }

    /// Like [`swipe`](Self::swipe) but leaves the evaluation pending.
    pub fn drag(&self, from: (f64, f64), to: (f64, f64)) {
        self.touch_start(from.0, from.1);
        for step in 1..=SWIPE_STEPS {
            let t = step as f64 / SWIPE_STEPS as f64;
            let point = lerp(from, to, t);
            self.advance(SWIPE_STEP_MS);
            self.touch_move(point.x, point.y);
        }
    }

    fn bound_name(&self, slot: ListenerSlot) -> Option<&'static str> {
        self.resolver
            .bound_events()
            .into_iter()
            .find(|(_, bound_slot)| *bound_slot == slot)
            .map(|(name, _)| name)
    }
}

fn finger(x: f64, y: f64) -> PointerSample {
    PointerSample::from_touches([Point::new(x, y)]).with_pointer_kind(PointerKind::Touch)
}

fn lerp(from: (f64, f64), to: (f64, f64), t: f64) -> Point {
    Point::new(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = LINES.lock() {
                lines.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    #[test]
    fn synthetic_input_is_traced() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);

        let robot = GestureRobot::new(Orientation::Horizontal, FakeEnvironment::desktop());
        robot.wheel(3.0);
        robot.touch_start(10.0, 10.0);

        let lines = LINES.lock().map(|lines| lines.clone()).unwrap_or_default();
        assert!(lines.iter().any(|line| line.starts_with("robot: `wheel`")));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("robot: no TouchStart listener bound")));
    }
}
