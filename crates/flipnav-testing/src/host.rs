//! In-memory implementations of the flipnav host traits.

use flipnav_core::{
    BindingError, Clock, Environment, EventSource, Host, InputEvent, InputSink, ListenerSlot,
    Scheduler, TaskHandle, Viewport,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// Clock whose time only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

struct ScheduledTask {
    handle: TaskHandle,
    due_ms: u64,
    task: Box<dyn FnOnce()>,
}

/// Scheduler on virtual time. Tasks run from [`ManualScheduler::advance`],
/// in due order, with the clock set to each task's due time.
#[derive(Clone)]
pub struct ManualScheduler {
    clock: ManualClock,
    next_handle: Rc<Cell<u64>>,
    tasks: Rc<RefCell<Vec<ScheduledTask>>>,
    honor_cancel: bool,
}

impl ManualScheduler {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            next_handle: Rc::new(Cell::new(1)),
            tasks: Rc::new(RefCell::new(Vec::new())),
            honor_cancel: true,
        }
    }

    /// A scheduler that ignores `cancel`, like a host whose timer API cannot
    /// revoke a callback. Pending tasks still run when due.
    pub fn ignoring_cancel(clock: ManualClock) -> Self {
        Self {
            honor_cancel: false,
            ..Self::new(clock)
        }
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Moves time forward by `delta_ms`, running every task that falls due.
    pub fn advance(&self, delta_ms: u64) {
        let target = self.clock.now_millis() + delta_ms;
        while let Some(task) = self.pop_due(target) {
            self.clock.set(task.due_ms.max(self.clock.now_millis()));
            (task.task)();
        }
        self.clock.set(target);
    }

    /// Runs everything pending, however far in the future.
    pub fn run_until_idle(&self) {
        while let Some(task) = self.pop_due(u64::MAX) {
            self.clock.set(task.due_ms.max(self.clock.now_millis()));
            (task.task)();
        }
    }

    fn pop_due(&self, target: u64) -> Option<ScheduledTask> {
        let mut tasks = self.tasks.borrow_mut();
        let index = tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_ms <= target)
            .min_by_key(|(_, task)| (task.due_ms, task.handle.0))
            .map(|(index, _)| index)?;
        Some(tasks.remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) -> TaskHandle {
        let handle = TaskHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.tasks.borrow_mut().push(ScheduledTask {
            handle,
            due_ms: self.clock.now_millis() + delay_ms,
            task,
        });
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        if self.honor_cancel {
            self.tasks.borrow_mut().retain(|task| task.handle != handle);
        }
    }
}

/// Listener bookkeeping operation, in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListenerOp {
    Add(&'static str, ListenerSlot),
    Remove(&'static str, ListenerSlot),
}

/// Event source that keeps listeners in a map and lets tests fire events.
#[derive(Clone, Default)]
pub struct RecordingEventSource {
    listeners: Rc<RefCell<HashMap<(&'static str, ListenerSlot), InputSink>>>,
    log: Rc<RefCell<Vec<ListenerOp>>>,
    rejected: Rc<RefCell<BTreeSet<&'static str>>>,
}

impl RecordingEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `add_listener` for `event` fail.
    pub fn reject(&self, event: &'static str) {
        self.rejected.borrow_mut().insert(event);
    }

    /// Delivers `event` to every listener registered under `name`. Returns
    /// how many listeners received it.
    pub fn emit(&self, name: &str, event: InputEvent) -> usize {
        let slot = event.slot();
        let sinks: Vec<InputSink> = self
            .listeners
            .borrow()
            .iter()
            .filter(|((event_name, listener_slot), _)| *event_name == name && *listener_slot == slot)
            .map(|(_, sink)| Rc::clone(sink))
            .collect();
        for sink in &sinks {
            sink(event.clone());
        }
        sinks.len()
    }

    pub fn is_listening(&self, name: &str) -> bool {
        self.listeners
            .borrow()
            .keys()
            .any(|(event_name, _)| *event_name == name)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn registered(&self) -> Vec<(&'static str, ListenerSlot)> {
        let mut registered: Vec<_> = self.listeners.borrow().keys().copied().collect();
        registered.sort_by_key(|(name, _)| *name);
        registered
    }

    pub fn operations(&self) -> Vec<ListenerOp> {
        self.log.borrow().clone()
    }
}

impl EventSource for RecordingEventSource {
    fn add_listener(
        &self,
        event: &'static str,
        slot: ListenerSlot,
        sink: InputSink,
    ) -> Result<(), BindingError> {
        if self.rejected.borrow().contains(event) {
            return Err(BindingError::Rejected {
                event,
                slot,
                reason: "rejected by test".into(),
            });
        }
        self.log.borrow_mut().push(ListenerOp::Add(event, slot));
        self.listeners.borrow_mut().insert((event, slot), sink);
        Ok(())
    }

    fn remove_listener(
        &self,
        event: &'static str,
        slot: ListenerSlot,
    ) -> Result<(), BindingError> {
        if self.listeners.borrow_mut().remove(&(event, slot)).is_some() {
            self.log.borrow_mut().push(ListenerOp::Remove(event, slot));
        }
        Ok(())
    }
}

/// Configurable capability answers.
#[derive(Clone, Debug)]
pub struct FakeEnvironment {
    user_agent: Option<String>,
    events: BTreeSet<String>,
    globals: BTreeSet<String>,
    max_touch_points: u32,
    viewport: Rc<Cell<Viewport>>,
}

pub const DESKTOP_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
pub const PHONE_USER_AGENT: &str =
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Mobile Safari/537.36";

impl FakeEnvironment {
    /// No capabilities at all.
    pub fn bare() -> Self {
        Self {
            user_agent: None,
            events: BTreeSet::new(),
            globals: BTreeSet::new(),
            max_touch_points: 0,
            viewport: Rc::new(Cell::new(Viewport::new(1000.0, 800.0))),
        }
    }

    /// Modern desktop browser: `wheel`, pointer events, no touch.
    pub fn desktop() -> Self {
        Self::bare()
            .with_user_agent(DESKTOP_USER_AGENT)
            .with_event("wheel")
            .with_event("mousewheel")
            .with_global("PointerEvent")
    }

    /// Modern phone browser: `wheel`, pointer events, touch.
    pub fn phone() -> Self {
        Self::desktop()
            .with_user_agent(PHONE_USER_AGENT)
            .with_event("touchstart")
            .with_max_touch_points(5)
    }

    pub fn with_user_agent(mut self, agent: &str) -> Self {
        self.user_agent = Some(agent.to_owned());
        self
    }

    pub fn with_event(mut self, event: &str) -> Self {
        self.events.insert(event.to_owned());
        self
    }

    pub fn with_global(mut self, name: &str) -> Self {
        self.globals.insert(name.to_owned());
        self
    }

    pub fn with_max_touch_points(mut self, points: u32) -> Self {
        self.max_touch_points = points;
        self
    }

    pub fn with_viewport(self, width: f64, height: f64) -> Self {
        self.viewport.set(Viewport::new(width, height));
        self
    }

    /// Resizes the viewport; later evaluations see the new size.
    pub fn resize(&self, width: f64, height: f64) {
        self.viewport.set(Viewport::new(width, height));
    }
}

impl Environment for FakeEnvironment {
    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }

    fn supports_event(&self, event: &str) -> bool {
        self.events.contains(event)
    }

    fn has_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }

    fn max_touch_points(&self) -> u32 {
        self.max_touch_points
    }

    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }
}

/// All in-memory host pieces, wired to one clock.
#[derive(Clone)]
pub struct TestHost {
    pub clock: ManualClock,
    pub scheduler: ManualScheduler,
    pub source: RecordingEventSource,
    pub environment: FakeEnvironment,
}

impl TestHost {
    pub fn new(environment: FakeEnvironment) -> Self {
        let clock = ManualClock::new(1_000);
        Self {
            scheduler: ManualScheduler::new(clock.clone()),
            clock,
            source: RecordingEventSource::new(),
            environment,
        }
    }

    /// Swaps in a scheduler that cannot cancel tasks.
    pub fn with_stubborn_scheduler(mut self) -> Self {
        self.scheduler = ManualScheduler::ignoring_cancel(self.clock.clone());
        self
    }

    pub fn host(&self) -> Host {
        Host::new(
            Rc::new(self.source.clone()),
            Rc::new(self.environment.clone()),
            Rc::new(self.clock.clone()),
            Rc::new(self.scheduler.clone()),
        )
    }
}
