//! [`Scheduler`] on `setTimeout`.

use flipnav_core::{Scheduler, TaskHandle};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

type TimeoutCallback = Closure<dyn FnMut()>;

/// Callbacks of timeouts that have neither fired nor been cleared, keyed by
/// timeout id. Releasing an entry drops its callback.
#[derive(Debug)]
pub(crate) struct TimerSlots<C> {
    entries: HashMap<i32, C>,
}

impl<C> Default for TimerSlots<C> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<C> TimerSlots<C> {
    pub(crate) fn insert(&mut self, id: i32, callback: C) {
        self.entries.insert(id, callback);
    }

    pub(crate) fn release(&mut self, id: i32) -> Option<C> {
        self.entries.remove(&id)
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (i32, C)> + '_ {
        self.entries.drain()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Runs tasks through `window.setTimeout`. Each callback lives until its
/// timeout fires or is cleared.
pub struct TimeoutScheduler {
    window: Window,
    timers: Rc<RefCell<TimerSlots<TimeoutCallback>>>,
}

impl TimeoutScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            timers: Rc::new(RefCell::new(TimerSlots::default())),
        }
    }

    /// Timeouts scheduled and not yet fired or cleared.
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u64, task: Box<dyn FnOnce()>) -> TaskHandle {
        let id = Rc::new(Cell::new(0));
        let timers: Weak<RefCell<TimerSlots<TimeoutCallback>>> = Rc::downgrade(&self.timers);
        let mut task = Some(task);
        let callback = {
            let id = Rc::clone(&id);
            Closure::wrap(Box::new(move || {
                let Some(task) = task.take() else {
                    return;
                };
                // Freed by wasm-bindgen once this invocation returns.
                if let Some(timers) = timers.upgrade() {
                    let released = timers.borrow_mut().release(id.get());
                    drop(released);
                }
                task();
            }) as Box<dyn FnMut()>)
        };

        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            ) {
            Ok(timeout_id) => {
                id.set(timeout_id);
                self.timers.borrow_mut().insert(timeout_id, callback);
                TaskHandle(timeout_id as u32 as u64)
            }
            Err(err) => {
                log::warn!("setTimeout failed: {err:?}");
                TaskHandle(0)
            }
        }
    }

    fn cancel(&self, handle: TaskHandle) {
        if handle.0 == 0 {
            return;
        }
        let timeout_id = handle.0 as u32 as i32;
        self.window.clear_timeout_with_handle(timeout_id);
        let released = self.timers.borrow_mut().release(timeout_id);
        drop(released);
    }
}

impl Drop for TimeoutScheduler {
    fn drop(&mut self) {
        let timers: Vec<_> = self.timers.borrow_mut().drain().collect();
        for (timeout_id, _callback) in timers {
            self.window.clear_timeout_with_handle(timeout_id);
        }
    }
}

impl std::fmt::Debug for TimeoutScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeoutScheduler")
            .field("pending_timers", &self.pending_timers())
            .finish_non_exhaustive()
    }
}
