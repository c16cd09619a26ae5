use crate::coords::Vec2;

use super::Color;

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

/// A single gradient stop.
///
/// `t` is expected in [0, 1] and stops are expected in ascending `t` order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient definition in logical pixel space.
///
/// Semantics:
/// - `start` and `end` are positions in the same coordinate space as geometry.
/// - Stops define premultiplied linear colors.
/// - `spread` defines out-of-range behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        Self {
            start,
            end,
            stops,
            spread,
        }
    }

    /// Builds a gradient from parallel color / position slices.
    ///
    /// Extra entries in the longer slice are ignored.
    pub fn from_colors(
        start: Vec2,
        end: Vec2,
        colors: &[Color],
        positions: &[f32],
        spread: SpreadMode,
    ) -> Self {
        let stops = colors
            .iter()
            .zip(positions)
            .map(|(&color, &t)| ColorStop::new(t, color))
            .collect();
        Self::new(start, end, stops, spread)
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && (self.end.x != self.start.x || self.end.y != self.start.y)
    }

    /// Same gradient with both endpoints moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            stops: self.stops.clone(),
            spread: self.spread,
        }
    }
}
