//! Loading-placeholder shimmer.
//!
//! [`ShimmerOverlay`] is the animated band; [`ColorConfig`] and
//! [`ConfigSource`] supply its colors. The widget that hosts the overlay over
//! a box of children lives in [`crate::widgets::Shimmer`].

mod config;
mod overlay;

pub use config::{
    AttributeSet, BASE_COLOR_ATTR, ColorConfig, ConfigSource, GRADIENT_POSITIONS, HIGHLIGHT_COLOR_ATTR,
};
pub use overlay::{ANIMATION_DURATION, EASE_OUT, REPEAT_DELAY, ShimmerOverlay, driver_timing, offset};
