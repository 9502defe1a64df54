pub mod touch;
pub mod wheel;

pub use touch::{GestureState, TouchGestureDetector};
pub use wheel::{WheelDelta, WheelGestureDetector, WheelVerdict};
