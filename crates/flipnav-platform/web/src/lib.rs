//! Browser host for `flipnav-core`.
//!
//! Wires DOM listeners, `setTimeout` and `performance.now()` into a
//! [`Host`], and exports [`ScrollNavigator`] for plain JavaScript callers.

mod decode;
mod environment;
mod event_source;
mod navigator;
mod scheduler;

pub use decode::{decode, decode_pointer, decode_wheel, pointer_kind_from_code, viewport_extent};
pub use environment::BrowserEnvironment;
pub use event_source::ElementEventSource;
pub use navigator::ScrollNavigator;
pub use scheduler::TimeoutScheduler;

use flipnav_core::{GestureDirectionResolver, Host, InstantClock, Orientation};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

/// Builds a browser [`Host`] that listens on `target`.
pub fn web_host(target: EventTarget) -> Result<Host, JsValue> {
    let window = web_sys::window().ok_or("no global window exists")?;
    Ok(Host::new(
        Rc::new(ElementEventSource::new(target)),
        Rc::new(BrowserEnvironment::new(window.clone())),
        Rc::new(InstantClock::new()),
        Rc::new(TimeoutScheduler::new(window)),
    ))
}

/// Attaches a resolver to the document body.
pub fn attach_to_body(
    on_next: impl Fn() + 'static,
    on_prev: impl Fn() + 'static,
    orientation: Orientation,
) -> Result<GestureDirectionResolver, JsValue> {
    let host = web_host(body()?.into())?;
    Ok(GestureDirectionResolver::create(
        on_next,
        on_prev,
        orientation,
        host,
    ))
}

pub(crate) fn body() -> Result<web_sys::HtmlElement, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
        .ok_or_else(|| JsValue::from_str("document has no body"))
}
