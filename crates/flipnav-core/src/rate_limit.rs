//! Rate limiting for navigation dispatch.
//!
//! [`Throttle`] is a leading-edge gate: the first attempt passes, everything
//! else inside the window is dropped. [`Debounce`] is a trailing coalescer:
//! each call replaces the pending task, which only runs once the host has
//! been quiet for the whole period.

use crate::platform::{Scheduler, TaskHandle};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct Throttle {
    window_ms: u64,
    last_fired_ms: Option<u64>,
}

impl Throttle {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_fired_ms: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Returns `true` and opens a new window when no window is open at `now_ms`.
    pub fn try_acquire(&mut self, now_ms: u64) -> bool {
        let open = match self.last_fired_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.window_ms,
            None => true,
        };
        if open {
            self.last_fired_ms = Some(now_ms);
        }
        open
    }

    pub fn reset(&mut self) {
        self.last_fired_ms = None;
    }
}

/// Trailing debounce over a host [`Scheduler`].
///
/// Every scheduled task is stamped with a generation number. Rescheduling or
/// cancelling bumps the generation, so a task the host fails to cancel still
/// turns into a no-op when it eventually runs.
pub struct Debounce {
    quiet_ms: u64,
    scheduler: Rc<dyn Scheduler>,
    generation: Rc<Cell<u64>>,
    pending: Rc<Cell<Option<TaskHandle>>>,
}

impl Debounce {
    pub fn new(quiet_ms: u64, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            quiet_ms,
            scheduler,
            generation: Rc::new(Cell::new(0)),
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    /// Replaces any pending task with `task`, due after the quiet period.
    pub fn call(&self, task: impl FnOnce() + 'static) {
        self.cancel();

        let generation = self.generation.get();
        let current = Rc::downgrade(&self.generation);
        let pending = Rc::downgrade(&self.pending);
        let handle = self.scheduler.schedule(
            self.quiet_ms,
            Box::new(move || {
                let Some(current) = current.upgrade() else {
                    return;
                };
                if current.get() != generation {
                    return;
                }
                if let Some(pending) = pending.upgrade() {
                    pending.set(None);
                }
                task();
            }),
        );
        self.pending.set(Some(handle));
    }

    /// Drops the pending task, if any.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl Drop for Debounce {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Debounce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounce")
            .field("quiet_ms", &self.quiet_ms)
            .field("pending", &self.pending.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scheduler that stores tasks and runs them on demand, ignoring cancel.
    #[derive(Default)]
    struct StubbornScheduler {
        tasks: RefCell<Vec<Box<dyn FnOnce()>>>,
    }

    impl StubbornScheduler {
        fn run_all(&self) {
            let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            for task in tasks {
                task();
            }
        }
    }

    impl Scheduler for StubbornScheduler {
        fn schedule(&self, _delay_ms: u64, task: Box<dyn FnOnce()>) -> TaskHandle {
            let mut tasks = self.tasks.borrow_mut();
            tasks.push(task);
            TaskHandle(tasks.len() as u64)
        }

        fn cancel(&self, _handle: TaskHandle) {}
    }

    #[test]
    fn throttle_is_leading_edge() {
        let mut throttle = Throttle::new(200);
        assert!(throttle.try_acquire(1_000));
        assert!(!throttle.try_acquire(1_001));
        assert!(!throttle.try_acquire(1_199));
        assert!(throttle.try_acquire(1_200));
        assert!(!throttle.try_acquire(1_300));
    }

    #[test]
    fn dropped_attempts_do_not_extend_window() {
        let mut throttle = Throttle::new(200);
        assert!(throttle.try_acquire(0));
        for now in (10..200).step_by(10) {
            assert!(!throttle.try_acquire(now));
        }
        assert!(throttle.try_acquire(200));
    }

    #[test]
    fn throttle_reset_reopens_window() {
        let mut throttle = Throttle::new(200);
        assert!(throttle.try_acquire(0));
        throttle.reset();
        assert!(throttle.try_acquire(1));
    }

    #[test]
    fn stale_debounce_tasks_are_ignored_even_if_not_cancelled() {
        let scheduler = Rc::new(StubbornScheduler::default());
        let debounce = Debounce::new(100, scheduler.clone());
        let runs = Rc::new(RefCell::new(Vec::new()));

        for value in 0..3 {
            let runs = Rc::clone(&runs);
            debounce.call(move || runs.borrow_mut().push(value));
        }
        assert!(debounce.is_pending());

        scheduler.run_all();
        assert_eq!(*runs.borrow(), vec![2]);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn cancelled_debounce_never_runs() {
        let scheduler = Rc::new(StubbornScheduler::default());
        let debounce = Debounce::new(100, scheduler.clone());
        let ran = Rc::new(Cell::new(false));

        let flag = Rc::clone(&ran);
        debounce.call(move || flag.set(true));
        debounce.cancel();
        scheduler.run_all();

        assert!(!ran.get());
        assert!(!debounce.is_pending());
    }

    #[test]
    fn dropped_debounce_never_runs() {
        let scheduler = Rc::new(StubbornScheduler::default());
        let ran = Rc::new(Cell::new(false));
        {
            let debounce = Debounce::new(100, scheduler.clone());
            let flag = Rc::clone(&ran);
            debounce.call(move || flag.set(true));
        }
        scheduler.run_all();
        assert!(!ran.get());
    }
}
