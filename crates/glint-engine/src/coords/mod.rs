//! Coordinate and geometry types shared across the compositor and UI.
//!
//! Canonical CPU space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down

mod corner_radii;
mod rect;
mod vec2;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
