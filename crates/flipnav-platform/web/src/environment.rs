//! [`Environment`] answered by the browser window.

use crate::decode::{read_number, viewport_extent};
use flipnav_core::{Environment, Viewport};
use wasm_bindgen::JsValue;
use web_sys::Window;

#[derive(Clone, Debug)]
pub struct BrowserEnvironment {
    window: Window,
}

impl BrowserEnvironment {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn from_global() -> Option<Self> {
        web_sys::window().map(Self::new)
    }
}

impl Environment for BrowserEnvironment {
    fn user_agent(&self) -> Option<String> {
        self.window.navigator().user_agent().ok()
    }

    fn supports_event(&self, event: &str) -> bool {
        let key = JsValue::from_str(&format!("on{event}"));
        let on_document = self
            .window
            .document()
            .map(|document| has_property(&document, &key))
            .unwrap_or(false);
        on_document || has_property(&self.window, &key)
    }

    fn has_global(&self, name: &str) -> bool {
        js_sys::Reflect::get(&self.window, &JsValue::from_str(name))
            .map(|value| !value.is_undefined() && !value.is_null())
            .unwrap_or(false)
    }

    fn max_touch_points(&self) -> u32 {
        let navigator = self.window.navigator();
        ["maxTouchPoints", "msMaxTouchPoints"]
            .into_iter()
            .filter_map(|key| read_number(&navigator, key))
            .filter(|points| points.is_finite() && *points > 0.0)
            .map(|points| points as u32)
            .max()
            .unwrap_or(0)
    }

    fn viewport(&self) -> Viewport {
        let (client_width, client_height) = self
            .window
            .document()
            .and_then(|document| document.document_element())
            .map(|root| (f64::from(root.client_width()), f64::from(root.client_height())))
            .unwrap_or((0.0, 0.0));
        let inner = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64());
        Viewport::new(
            viewport_extent(client_width, inner(self.window.inner_width())),
            viewport_extent(client_height, inner(self.window.inner_height())),
        )
    }
}

fn has_property(target: &JsValue, key: &JsValue) -> bool {
    js_sys::Reflect::has(target, key).unwrap_or(false)
}
