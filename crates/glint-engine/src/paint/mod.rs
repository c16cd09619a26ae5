//! Paint model shared between UI and the compositor.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - paint sources (solid, gradients)
//! - compositing operators
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;
mod error;
mod paint;

pub use color::Color;
pub use error::ColorParseError;
pub use gradient::{ColorStop, LinearGradient, SpreadMode};
pub use paint::{BlendMode, Paint};
