use std::cell::Cell;

/// Current slide of a fixed-size deck. Navigation stops at either end.
#[derive(Debug)]
pub struct SlideDeck {
    len: usize,
    current: Cell<usize>,
}

impl SlideDeck {
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            current: Cell::new(0),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current.get()
    }

    /// Returns whether the slide changed.
    pub fn next(&self) -> bool {
        let current = self.current.get();
        if current + 1 >= self.len {
            return false;
        }
        self.current.set(current + 1);
        true
    }

    pub fn prev(&self) -> bool {
        let current = self.current.get();
        if current == 0 {
            return false;
        }
        self.current.set(current - 1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipnav_core::{GestureDirectionResolver, Orientation};
    use flipnav_testing::{FakeEnvironment, TestHost};
    use std::rc::Rc;

    #[test]
    fn deck_stops_at_both_ends() {
        let deck = SlideDeck::new(2);
        assert!(!deck.prev());
        assert!(deck.next());
        assert!(!deck.next());
        assert_eq!(deck.current(), 1);
    }

    #[test]
    fn wheel_flicks_walk_the_deck() {
        let _ = env_logger::builder().is_test(true).try_init();
        let host = TestHost::new(FakeEnvironment::desktop());
        let deck = Rc::new(SlideDeck::new(3));
        let (next_deck, prev_deck) = (Rc::clone(&deck), Rc::clone(&deck));
        let _resolver = GestureDirectionResolver::create(
            move || {
                next_deck.next();
            },
            move || {
                prev_deck.prev();
            },
            Orientation::Vertical,
            host.host(),
        );

        for delta in [3.0, 3.0, 3.0, -3.0] {
            host.source.emit(
                "wheel",
                flipnav_core::InputEvent::Wheel(flipnav_core::WheelSample::from_delta_y(delta)),
            );
            host.scheduler.advance(300);
        }
        assert_eq!(deck.current(), 1);
    }
}
