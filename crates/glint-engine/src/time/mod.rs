//! Time subsystem.
//!
//! Provides stable, testable timing utilities without coupling to a runtime:
//! - `FrameClock` produces per-frame timestamps, either from the wall clock
//!   or at a fixed step for offline rendering
//! - `CubicBezier` maps linear progress onto a timing curve
//! - `AnimationDriver` turns frame timestamps into repeating, eased progress
//!   and notifies update listeners once per tick

mod driver;
mod easing;
mod frame_clock;

pub use driver::{AnimationDriver, DriverTiming, DriverUpdate, ListenerId, RepeatCount, RepeatMode};
pub use easing::CubicBezier;
pub use frame_clock::{FrameClock, FrameTime};
