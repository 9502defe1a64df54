//! [`EventSource`] over a DOM `EventTarget`.

use crate::decode::decode;
use flipnav_core::{BindingError, EventSource, InputSink, ListenerSlot};
use std::cell::RefCell;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

type Listener = Closure<dyn FnMut(Event)>;

/// Listens on one element. Closures are owned here and dropped when their
/// listener is removed.
pub struct ElementEventSource {
    target: EventTarget,
    listeners: RefCell<HashMap<(&'static str, ListenerSlot), Listener>>,
    prevent_scroll: bool,
}

impl ElementEventSource {
    pub fn new(target: EventTarget) -> Self {
        Self {
            target,
            listeners: RefCell::new(HashMap::new()),
            prevent_scroll: true,
        }
    }

    /// Leaves native scrolling alone on touch moves. By default the page is
    /// kept from panning while a swipe is being tracked.
    pub fn with_native_scroll(mut self) -> Self {
        self.prevent_scroll = false;
        self
    }

    pub fn target(&self) -> &EventTarget {
        &self.target
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl EventSource for ElementEventSource {
    fn add_listener(
        &self,
        event: &'static str,
        slot: ListenerSlot,
        sink: InputSink,
    ) -> Result<(), BindingError> {
        self.remove_listener(event, slot)?;

        let prevent_scroll = self.prevent_scroll && slot == ListenerSlot::TouchMove;
        let closure = Closure::wrap(Box::new(move |dom_event: Event| {
            if prevent_scroll && dom_event.cancelable() {
                dom_event.prevent_default();
            }
            sink(decode(slot, &dom_event));
        }) as Box<dyn FnMut(Event)>);

        self.target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|err| rejected(event, slot, &err))?;
        self.listeners.borrow_mut().insert((event, slot), closure);
        Ok(())
    }

    fn remove_listener(
        &self,
        event: &'static str,
        slot: ListenerSlot,
    ) -> Result<(), BindingError> {
        let Some(closure) = self.listeners.borrow_mut().remove(&(event, slot)) else {
            return Ok(());
        };
        self.target
            .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|err| rejected(event, slot, &err))
    }
}

impl Drop for ElementEventSource {
    fn drop(&mut self) {
        for ((event, _), closure) in self.listeners.get_mut().drain() {
            let _ = self
                .target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

impl std::fmt::Debug for ElementEventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementEventSource")
            .field("listeners", &self.listener_count())
            .field("prevent_scroll", &self.prevent_scroll)
            .finish()
    }
}

fn rejected(event: &'static str, slot: ListenerSlot, err: &JsValue) -> BindingError {
    BindingError::Rejected {
        event,
        slot,
        reason: err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}
