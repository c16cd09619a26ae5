//! Glint engine crate.
//!
//! Owns the renderer-agnostic pieces used by the widget layer: geometry,
//! the paint model, the recorded draw stream, a CPU compositor for that
//! stream, and the timing primitives that drive animations.

pub mod time;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
