use crate::error::ParseOrientationError;
use smallvec::SmallVec;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Layout viewport in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis along which a swipe is interpreted. Fixed for a handler's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Ok(Orientation::Horizontal),
            "v" | "vertical" => Ok(Orientation::Vertical),
            _ => Err(ParseOrientationError {
                value: value.to_owned(),
            }),
        }
    }
}

/// Sole output of both detectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavigationDirection {
    Next,
    Prev,
    #[default]
    None,
}

impl NavigationDirection {
    pub fn is_none(self) -> bool {
        matches!(self, NavigationDirection::None)
    }
}

/// Pointer type as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
    Other,
}

impl PointerKind {
    pub fn from_pointer_type(value: &str) -> Self {
        match value {
            "mouse" => PointerKind::Mouse,
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Other,
        }
    }
}

/// Raw coordinates carried by a touch, pointer, or mouse event.
///
/// Every field is optional so that partially populated host events can be
/// represented without inventing values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// Event-level page coordinates, when the event shape carries them.
    pub page: Option<Point>,
    /// Page coordinates of each active touch point. `None` when the event has
    /// no touch list at all, `Some(empty)` when it has an empty one.
    pub touches: Option<SmallVec<[Point; 2]>>,
    /// `None` for event shapes without a pointer type (plain touch events).
    pub pointer_kind: Option<PointerKind>,
}

impl PointerSample {
    pub fn from_page(x: f64, y: f64) -> Self {
        Self {
            page: Some(Point::new(x, y)),
            ..Self::default()
        }
    }

    pub fn from_touches(touches: impl IntoIterator<Item = Point>) -> Self {
        Self {
            touches: Some(touches.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn with_pointer_kind(mut self, kind: PointerKind) -> Self {
        self.pointer_kind = Some(kind);
        self
    }

    pub fn first_touch(&self) -> Option<Point> {
        self.touches.as_ref().and_then(|touches| touches.first().copied())
    }
}

/// Raw scroll quantities carried by the wheel event family.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelSample {
    /// Legacy `wheelDelta` (`mousewheel` events and some `wheel` events).
    pub wheel_delta: Option<f64>,
    /// Standard `deltaY` (`wheel` events).
    pub delta_y: Option<f64>,
    /// `detail` (`MozMousePixelScroll` / `DOMMouseScroll` events).
    pub detail: Option<f64>,
}

impl WheelSample {
    pub fn from_delta_y(delta_y: f64) -> Self {
        Self {
            delta_y: Some(delta_y),
            ..Self::default()
        }
    }

    pub fn from_wheel_delta(wheel_delta: f64) -> Self {
        Self {
            wheel_delta: Some(wheel_delta),
            ..Self::default()
        }
    }
}

/// Which listener an event source routes an event to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerSlot {
    Wheel,
    TouchStart,
    TouchMove,
}

/// A host event decoded into the engine's vocabulary.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Wheel(WheelSample),
    TouchStart(PointerSample),
    TouchMove(PointerSample),
}

impl InputEvent {
    pub fn slot(&self) -> ListenerSlot {
        match self {
            InputEvent::Wheel(_) => ListenerSlot::Wheel,
            InputEvent::TouchStart(_) => ListenerSlot::TouchStart,
            InputEvent::TouchMove(_) => ListenerSlot::TouchMove,
        }
    }
}
