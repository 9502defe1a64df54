//! The orchestrator: routes host events through the detectors and rate
//! limiters and invokes the consumer's callbacks.

use crate::binding::{Binding, EventBindingManager};
use crate::device_probe::{DeviceCapabilities, DeviceProbe};
use crate::gesture_constants::{DEBOUNCE_QUIET_MS, THROTTLE_WINDOW_MS};
use crate::gestures::{TouchGestureDetector, WheelGestureDetector};
use crate::normalize::normalize_wheel_delta;
use crate::platform::{Clock, Environment, Host, InputSink};
use crate::rate_limit::{Debounce, Throttle};
use crate::settings::{GestureSettings, NavigationConfig};
use crate::types::{InputEvent, NavigationDirection, Orientation, PointerSample, WheelSample};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Shared handle to a resolver's `disabled` flag.
///
/// Clones observe and mutate the same flag, so a consumer can keep one and
/// flip it from anywhere, including from inside a navigation callback. The
/// flag is read at the moment of dispatch.
#[derive(Clone, Debug, Default)]
pub struct DisabledFlag(Rc<Cell<bool>>);

impl DisabledFlag {
    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, disabled: bool) {
        self.0.set(disabled);
    }
}

struct ResolverShared {
    config: NavigationConfig,
    capabilities: DeviceCapabilities,
    environment: Rc<dyn Environment>,
    clock: Rc<dyn Clock>,
    disabled: DisabledFlag,
    active: Cell<bool>,
    wheel: RefCell<WheelGestureDetector>,
    touch: RefCell<TouchGestureDetector>,
    throttle: RefCell<Throttle>,
    debounce: Debounce,
}

impl ResolverShared {
    fn handle(self: &Rc<Self>, event: InputEvent) {
        if !self.active.get() {
            return;
        }
        match event {
            InputEvent::Wheel(sample) => self.on_wheel(&sample),
            InputEvent::TouchStart(sample) => self.on_touch_start(&sample),
            InputEvent::TouchMove(sample) => self.on_touch_move(&sample),
        }
    }

    fn on_wheel(&self, sample: &WheelSample) {
        let Some(delta) = normalize_wheel_delta(sample) else {
            log::trace!("ignoring wheel event without a usable delta");
            return;
        };
        let now = self.clock.now_millis();
        let direction = self.wheel.borrow_mut().classify(delta, now);
        self.request_dispatch(direction, now);
    }

    fn on_touch_start(&self, sample: &PointerSample) {
        let accepted = self
            .touch
            .borrow_mut()
            .begin_sample(sample, self.capabilities.touch_capable());
        log::trace!("touch start accepted: {accepted}");
    }

    fn on_touch_move(self: &Rc<Self>, sample: &PointerSample) {
        let tracked = self
            .touch
            .borrow_mut()
            .track_sample(sample, self.capabilities.touch_capable());
        if !tracked {
            return;
        }

        let shared: Weak<Self> = Rc::downgrade(self);
        self.debounce.call(move || {
            if let Some(shared) = shared.upgrade() {
                shared.evaluate_touch();
            }
        });
    }

    fn evaluate_touch(&self) {
        if !self.active.get() {
            return;
        }
        let viewport = self.environment.viewport();
        let direction = self.touch.borrow().evaluate(viewport);
        self.request_dispatch(direction, self.clock.now_millis());
    }

    fn request_dispatch(&self, direction: NavigationDirection, now_ms: u64) {
        if direction.is_none() {
            return;
        }
        let acquired = self.throttle.borrow_mut().try_acquire(now_ms);
        if !acquired {
            log::debug!("dropping {direction:?}: throttled");
            return;
        }
        self.dispatch(direction);
    }

    fn dispatch(&self, direction: NavigationDirection) {
        if !self.active.get() {
            log::debug!("suppressing {direction:?}: resolver torn down");
            return;
        }
        if self.disabled.get() {
            log::debug!("suppressing {direction:?}: disabled");
            return;
        }
        if let Some(callback) = self.config.callback_for(direction) {
            log::debug!("dispatching {direction:?}");
            callback();
        }
    }
}

/// Turns wheel and swipe input into `next`/`prev` callbacks.
///
/// Listeners are registered on construction and removed by [`teardown`]
/// or on drop. After teardown no callback fires again, including debounced
/// evaluations that were already scheduled.
///
/// [`teardown`]: GestureDirectionResolver::teardown
pub struct GestureDirectionResolver {
    shared: Rc<ResolverShared>,
    bindings: RefCell<EventBindingManager>,
}

impl GestureDirectionResolver {
    /// Builds a resolver with default settings.
    pub fn create(
        on_next: impl Fn() + 'static,
        on_prev: impl Fn() + 'static,
        orientation: Orientation,
        host: Host,
    ) -> Self {
        Self::new(
            NavigationConfig::new(on_next, on_prev, orientation),
            GestureSettings::default(),
            host,
        )
    }

    pub fn new(config: NavigationConfig, settings: GestureSettings, host: Host) -> Self {
        let capabilities = DeviceProbe::probe(host.environment.as_ref());

        let shared = Rc::new(ResolverShared {
            wheel: RefCell::new(WheelGestureDetector::new(settings.wheel)),
            touch: RefCell::new(TouchGestureDetector::new(
                config.orientation(),
                settings.swipe_threshold_ratio,
            )),
            config,
            capabilities,
            environment: host.environment,
            clock: host.clock,
            disabled: DisabledFlag::default(),
            active: Cell::new(true),
            throttle: RefCell::new(Throttle::new(THROTTLE_WINDOW_MS)),
            debounce: Debounce::new(DEBOUNCE_QUIET_MS, host.scheduler),
        });

        let mut bindings = EventBindingManager::new(host.source, capabilities.events);
        let weak = Rc::downgrade(&shared);
        let sink: InputSink = Rc::new(move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.handle(event);
            }
        });
        let bound = bindings.attach(sink);
        log::debug!("resolver attached {bound} listener(s)");

        Self {
            shared,
            bindings: RefCell::new(bindings),
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.shared.config.orientation()
    }

    pub fn capabilities(&self) -> DeviceCapabilities {
        self.shared.capabilities
    }

    pub fn disabled(&self) -> bool {
        self.shared.disabled.get()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.shared.disabled.set(disabled);
    }

    /// A handle to the `disabled` flag that outlives borrows of the resolver.
    pub fn disabled_flag(&self) -> DisabledFlag {
        self.shared.disabled.clone()
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.get()
    }

    /// Listeners currently registered with the host.
    pub fn bound_events(&self) -> Vec<Binding> {
        self.bindings.borrow().bound().to_vec()
    }

    /// Feeds an event directly, bypassing the event source. Useful for hosts
    /// that route events themselves.
    pub fn handle_event(&self, event: InputEvent) {
        self.shared.handle(event);
    }

    /// Removes every listener and cancels pending work. Idempotent.
    pub fn teardown(&self) {
        let was_active = self.shared.active.replace(false);
        self.shared.debounce.cancel();
        if let Ok(mut bindings) = self.bindings.try_borrow_mut() {
            bindings.detach();
        }
        if was_active {
            log::debug!("resolver torn down");
        }
    }
}

impl Drop for GestureDirectionResolver {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for GestureDirectionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureDirectionResolver")
            .field("orientation", &self.orientation())
            .field("active", &self.is_active())
            .field("disabled", &self.disabled())
            .field("capabilities", &self.shared.capabilities)
            .finish_non_exhaustive()
    }
}
