//! Testing utilities and harness for flipnav
//!
//! Everything here runs on virtual time: nothing sleeps, and deferred work
//! only runs when a test advances the clock.

pub mod host;
pub mod robot;

pub use host::*;
pub use robot::*;

pub mod prelude {
    pub use crate::host::*;
    pub use crate::robot::*;
}
