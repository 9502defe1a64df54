//! Slide deck demo: wheel or swipe on the page to move between slides.

pub mod deck;

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::deck::SlideDeck;
    use flipnav_core::Orientation;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    const SLIDE_COUNT: usize = 8;

    thread_local! {
        static NAVIGATOR: std::cell::RefCell<Option<flipnav_core::GestureDirectionResolver>> =
            const { std::cell::RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

        let deck = Rc::new(SlideDeck::new(SLIDE_COUNT));
        let next_deck = Rc::clone(&deck);
        let prev_deck = Rc::clone(&deck);
        let resolver = flipnav_platform_web::attach_to_body(
            move || {
                if next_deck.next() {
                    log::info!("slide {}/{}", next_deck.current() + 1, next_deck.slide_count());
                }
            },
            move || {
                if prev_deck.prev() {
                    log::info!("slide {}/{}", prev_deck.current() + 1, prev_deck.slide_count());
                }
            },
            Orientation::Vertical,
        )?;
        log::info!("listening on {:?}", resolver.bound_events());
        NAVIGATOR.with(|slot| *slot.borrow_mut() = Some(resolver));
        Ok(())
    }
}
