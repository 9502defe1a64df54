//! Gesture classification and rate limiting for slide navigation.
//!
//! `flipnav-core` turns wheel, trackpad, pointer and touch input into two
//! callbacks: `next` and `prev`. Momentum scrolling is filtered out, swipes
//! are measured against the viewport, and every dispatch is throttled so one
//! physical gesture moves one slide.
//!
//! The engine is host independent. A host supplies the traits in
//! [`platform`]; `flipnav-platform-web` implements them for browsers and
//! `flipnav-testing` implements them in memory.

pub mod binding;
pub mod device_probe;
pub mod error;
pub mod gesture_constants;
pub mod gestures;
pub mod normalize;
pub mod platform;
pub mod rate_limit;
pub mod resolver;
pub mod settings;
pub mod types;

pub use binding::{Binding, EventBindingManager};
pub use device_probe::{
    DeviceCapabilities, DeviceProbe, ResolvedEventNames, TouchEventFamily, WheelEventName,
};
pub use error::{BindingError, ParseOrientationError};
pub use gestures::{GestureState, TouchGestureDetector, WheelGestureDetector};
pub use platform::{
    Clock, Environment, EventSource, Host, InputSink, InstantClock, Scheduler, TaskHandle,
};
pub use rate_limit::{Debounce, Throttle};
pub use resolver::{DisabledFlag, GestureDirectionResolver};
pub use settings::{GestureSettings, NavigationCallback, NavigationConfig, WheelSettings};
pub use types::{
    InputEvent, ListenerSlot, NavigationDirection, Orientation, Point, PointerKind,
    PointerSample, Viewport, WheelSample,
};

pub mod prelude {
    pub use crate::platform::{Clock, Environment, EventSource, Host, Scheduler};
    pub use crate::resolver::{DisabledFlag, GestureDirectionResolver};
    pub use crate::settings::{GestureSettings, NavigationConfig};
    pub use crate::types::{InputEvent, NavigationDirection, Orientation};
}
