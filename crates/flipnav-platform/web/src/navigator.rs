use crate::{body, web_host};
use flipnav_core::{GestureDirectionResolver, Orientation};
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

/// JavaScript handle around a resolver.
///
/// ```js
/// const nav = new ScrollNavigator(document.body, next, prev, "v");
/// nav.disabled = true;
/// nav.teardown();
/// ```
#[wasm_bindgen]
pub struct ScrollNavigator {
    resolver: GestureDirectionResolver,
}

#[wasm_bindgen]
impl ScrollNavigator {
    /// `target` defaults to the document body. `orientation` is `"h"`, `"v"`, `"horizontal"` or `"vertical"`;
    /// horizontal when omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(
        target: Option<EventTarget>,
        on_next: js_sys::Function,
        on_prev: js_sys::Function,
        orientation: Option<String>,
    ) -> Result<ScrollNavigator, JsValue> {
        let orientation = match orientation {
            Some(value) => value
                .parse::<Orientation>()
                .map_err(|err| JsValue::from_str(&err.to_string()))?,
            None => Orientation::default(),
        };
        let target = match target {
            Some(target) => target,
            None => body()?.into(),
        };
        let host = web_host(target)?;
        let resolver = GestureDirectionResolver::create(
            move || invoke("next", &on_next),
            move || invoke("prev", &on_prev),
            orientation,
            host,
        );
        Ok(Self { resolver })
    }

    #[wasm_bindgen(getter)]
    pub fn disabled(&self) -> bool {
        self.resolver.disabled()
    }

    #[wasm_bindgen(setter)]
    pub fn set_disabled(&self, disabled: bool) {
        self.resolver.set_disabled(disabled);
    }

    /// Removes every listener. Further input is ignored.
    pub fn teardown(&self) {
        self.resolver.teardown();
    }
}

fn invoke(label: &str, callback: &js_sys::Function) {
    if let Err(err) = callback.call0(&JsValue::NULL) {
        log::error!("{label} callback threw: {err:?}");
    }
}
