//! Host abstraction traits for the navigation engine.
//!
//! The engine never touches a browser API directly. Event delivery, feature
//! probing, time and deferred execution are delegated to the host through the
//! traits below, so the same resolver runs in a browser and in a test harness.
//!
//! Everything here is single-threaded: implementations live on the host's UI
//! event loop and are shared through `Rc`.

use crate::error::BindingError;
use crate::types::{InputEvent, ListenerSlot, Viewport};
use std::rc::Rc;

/// Callback an event source invokes with every decoded event.
pub type InputSink = Rc<dyn Fn(InputEvent)>;

/// Attaches and detaches listeners on whatever element the host chose.
///
/// A listener is identified by `(event, slot)`. Adding the same pair twice
/// must replace the earlier registration; removing an absent pair must be a
/// no-op returning `Ok(())`.
pub trait EventSource {
    fn add_listener(
        &self,
        event: &'static str,
        slot: ListenerSlot,
        sink: InputSink,
    ) -> Result<(), BindingError>;

    fn remove_listener(&self, event: &'static str, slot: ListenerSlot)
        -> Result<(), BindingError>;
}

/// Best-effort capability probes. None of these may fail; an API the host
/// does not have simply reports as absent.
pub trait Environment {
    /// The user agent string, if the host exposes one.
    fn user_agent(&self) -> Option<String>;

    /// Whether an `on<event>` handler property exists (`"wheel"` probes `onwheel`).
    fn supports_event(&self, event: &str) -> bool;

    /// Whether a global constructor such as `PointerEvent` exists.
    fn has_global(&self, name: &str) -> bool;

    /// Largest reported simultaneous touch point count (`maxTouchPoints` or
    /// the legacy `msMaxTouchPoints`).
    fn max_touch_points(&self) -> u32;

    /// Current layout viewport.
    fn viewport(&self) -> Viewport;
}

/// Provides timing information for the engine.
pub trait Clock {
    /// Monotonic milliseconds since an arbitrary origin.
    fn now_millis(&self) -> u64;
}

/// Identifies a task handed to a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

/// Runs deferred work on the host event loop.
pub trait Scheduler {
    /// Run `task` once, no earlier than `delay_ms` from now.
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) -> TaskHandle;

    /// Cancel a task that has not run yet. Unknown or spent handles are ignored.
    fn cancel(&self, handle: TaskHandle);
}

/// [`Clock`] backed by `web_time::Instant`, which maps to `performance.now()`
/// on wasm and to `std::time::Instant` elsewhere.
#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: web_time::Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: web_time::Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// The set of host services a resolver is built on.
#[derive(Clone)]
pub struct Host {
    pub source: Rc<dyn EventSource>,
    pub environment: Rc<dyn Environment>,
    pub clock: Rc<dyn Clock>,
    pub scheduler: Rc<dyn Scheduler>,
}

impl Host {
    pub fn new(
        source: Rc<dyn EventSource>,
        environment: Rc<dyn Environment>,
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            source,
            environment,
            clock,
            scheduler,
        }
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host").finish_non_exhaustive()
    }
}
