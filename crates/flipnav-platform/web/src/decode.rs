//! Browser event decoding.
//!
//! Each DOM event is read exactly once into the engine's vocabulary. Missing
//! fields stay `None`; nothing here fails.

use flipnav_core::{InputEvent, ListenerSlot, Point, PointerKind, PointerSample, WheelSample};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, MouseEvent, PointerEvent, TouchEvent, UiEvent, WheelEvent};

pub fn decode(slot: ListenerSlot, event: &Event) -> InputEvent {
    match slot {
        ListenerSlot::Wheel => InputEvent::Wheel(decode_wheel(event)),
        ListenerSlot::TouchStart => InputEvent::TouchStart(decode_pointer(event)),
        ListenerSlot::TouchMove => InputEvent::TouchMove(decode_pointer(event)),
    }
}

pub fn decode_wheel(event: &Event) -> WheelSample {
    WheelSample {
        // Non-standard, only reachable reflectively.
        wheel_delta: read_number(event, "wheelDelta"),
        delta_y: event.dyn_ref::<WheelEvent>().map(WheelEvent::delta_y),
        detail: event
            .dyn_ref::<UiEvent>()
            .map(|ui| f64::from(ui.detail())),
    }
}

pub fn decode_pointer(event: &Event) -> PointerSample {
    let page = event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| Point::new(f64::from(mouse.page_x()), f64::from(mouse.page_y())));

    let touches = event.dyn_ref::<TouchEvent>().map(|touch_event| {
        let list = touch_event.touches();
        (0..list.length())
            .filter_map(|index| list.get(index))
            .map(|touch| Point::new(f64::from(touch.page_x()), f64::from(touch.page_y())))
            .collect()
    });

    let pointer_kind = match event.dyn_ref::<PointerEvent>() {
        Some(pointer) => Some(PointerKind::from_pointer_type(&pointer.pointer_type())),
        None => legacy_pointer_kind(event),
    };

    PointerSample {
        page,
        touches,
        pointer_kind,
    }
}

/// `MSPointerEvent.pointerType` is numeric on IE10 and a string on IE11.
fn legacy_pointer_kind(event: &Event) -> Option<PointerKind> {
    let value = js_sys::Reflect::get(event, &JsValue::from_str("pointerType")).ok()?;
    if let Some(kind) = value.as_string() {
        return Some(PointerKind::from_pointer_type(&kind));
    }
    value.as_f64().map(pointer_kind_from_code)
}

/// IE10 `MSPOINTER_TYPE_*` constants.
pub fn pointer_kind_from_code(code: f64) -> PointerKind {
    match code {
        c if c == 2.0 => PointerKind::Touch,
        c if c == 3.0 => PointerKind::Pen,
        c if c == 4.0 => PointerKind::Mouse,
        _ => PointerKind::Other,
    }
}

/// Larger of the root element's client extent and the window's inner
/// extent. Missing or non-finite values count as zero.
pub fn viewport_extent(client: f64, inner: Option<f64>) -> f64 {
    let finite = |value: f64| if value.is_finite() { value } else { 0.0 };
    finite(client).max(inner.map(finite).unwrap_or(0.0))
}

pub(crate) fn read_number(target: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_f64())
}
