//! Listener registration against the host event source.

use crate::device_probe::ResolvedEventNames;
use crate::platform::{EventSource, InputSink};
use crate::types::ListenerSlot;
use smallvec::SmallVec;
use std::rc::Rc;

pub type Binding = (&'static str, ListenerSlot);

/// Owns the listener registrations of one resolver.
///
/// The names are resolved once by the device probe; attach and detach both
/// walk the same list, so teardown always removes exactly what attach could
/// have added.
pub struct EventBindingManager {
    source: Rc<dyn EventSource>,
    names: ResolvedEventNames,
    bound: SmallVec<[Binding; 3]>,
}

impl EventBindingManager {
    pub fn new(source: Rc<dyn EventSource>, names: ResolvedEventNames) -> Self {
        Self {
            source,
            names,
            bound: SmallVec::new(),
        }
    }

    pub fn names(&self) -> ResolvedEventNames {
        self.names
    }

    /// Every binding this manager would register.
    pub fn planned(&self) -> SmallVec<[Binding; 3]> {
        let mut planned = SmallVec::new();
        planned.push((self.names.wheel.as_str(), ListenerSlot::Wheel));
        if let Some(family) = self.names.touch {
            planned.push((family.start(), ListenerSlot::TouchStart));
            planned.push((family.moved(), ListenerSlot::TouchMove));
        }
        planned
    }

    /// Bindings that were registered successfully.
    pub fn bound(&self) -> &[Binding] {
        &self.bound
    }

    /// Registers every planned binding, routing events to `sink`.
    ///
    /// Existing registrations for the same binding are removed first, so
    /// repeated calls never double-fire. Failures are logged and skipped;
    /// returns how many bindings are live afterwards.
    pub fn attach(&mut self, sink: InputSink) -> usize {
        self.bound.clear();
        for (event, slot) in self.planned() {
            if let Err(err) = self.source.remove_listener(event, slot) {
                log::warn!("failed to clear previous listener: {err}");
            }
            match self.source.add_listener(event, slot, Rc::clone(&sink)) {
                Ok(()) => {
                    log::debug!("bound {slot:?} listener to `{event}`");
                    self.bound.push((event, slot));
                }
                Err(err) => log::warn!("failed to bind listener: {err}"),
            }
        }
        self.bound.len()
    }

    /// Removes every planned binding. Safe to call any number of times.
    pub fn detach(&mut self) {
        for (event, slot) in self.planned() {
            if let Err(err) = self.source.remove_listener(event, slot) {
                log::warn!("failed to remove listener: {err}");
            }
        }
        if !self.bound.is_empty() {
            log::debug!("detached {} listener(s)", self.bound.len());
        }
        self.bound.clear();
    }
}

impl std::fmt::Debug for EventBindingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBindingManager")
            .field("names", &self.names)
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}
