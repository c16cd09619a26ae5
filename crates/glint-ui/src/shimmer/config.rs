use std::collections::HashMap;

use glint_engine::paint::{Color, ColorParseError};

/// Attribute name of the band's resting color.
pub const BASE_COLOR_ATTR: &str = "baseColor";
/// Attribute name of the band's peak color.
pub const HIGHLIGHT_COLOR_ATTR: &str = "highlightColor";

/// Stop positions of the shimmer gradient, paired with [`ColorConfig::gradient_colors`].
pub const GRADIENT_POSITIONS: [f32; 3] = [0.0, 0.5, 1.0];

// ── ConfigSource ──────────────────────────────────────────────────────────

/// Styled-attribute lookup provided by the host.
///
/// Consulted once, when a shimmer is constructed.
pub trait ConfigSource {
    /// Color stored under `name`, or `None` when the attribute is absent.
    fn color(&self, name: &str) -> Option<Color>;
}

/// In-memory [`ConfigSource`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    colors: HashMap<String, Color>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_color(mut self, name: impl Into<String>, color: Color) -> Self {
        self.insert(name, color);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, color: Color) {
        self.colors.insert(name.into(), color);
    }

    /// Parses `hex` (`#RGB`, `#RRGGBB` or `#AARRGGBB`) and stores it under `name`.
    pub fn insert_hex(&mut self, name: impl Into<String>, hex: &str) -> Result<(), ColorParseError> {
        let color = Color::from_hex(hex)?;
        self.insert(name, color);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl ConfigSource for AttributeSet {
    fn color(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }
}

// ── ColorConfig ───────────────────────────────────────────────────────────

/// The two colors a shimmer band is built from.
///
/// Both default to fully transparent.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorConfig {
    pub base: Color,
    pub highlight: Color,
}

impl ColorConfig {
    pub fn new(base: Color, highlight: Color) -> Self {
        Self { base, highlight }
    }

    /// Overrides each color the source provides; absent attributes keep the current value.
    pub fn apply_source(&mut self, source: &dyn ConfigSource) {
        if let Some(c) = source.color(BASE_COLOR_ATTR) {
            self.base = c;
        }
        if let Some(c) = source.color(HIGHLIGHT_COLOR_ATTR) {
            self.highlight = c;
        }
    }

    /// Symmetric band: base, highlight, base.
    #[inline]
    pub fn gradient_colors(&self) -> [Color; 3] {
        [self.base, self.highlight, self.base]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey(v: u8) -> Color {
        Color::from_srgb_u8(v, v, v, 255)
    }

    #[test]
    fn defaults_are_transparent() {
        let c = ColorConfig::default();
        assert_eq!(c.base, Color::transparent());
        assert_eq!(c.highlight, Color::transparent());
    }

    #[test]
    fn gradient_colors_mirror_base() {
        let c = ColorConfig::new(grey(200), grey(240));
        assert_eq!(c.gradient_colors(), [grey(200), grey(240), grey(200)]);
        assert_eq!(GRADIENT_POSITIONS, [0.0, 0.5, 1.0]);
    }

    // ── sources ───────────────────────────────────────────────────────────

    #[test]
    fn source_overrides_only_present_attributes() {
        let attrs = AttributeSet::new().with_color(HIGHLIGHT_COLOR_ATTR, grey(250));
        let mut c = ColorConfig::new(grey(10), grey(20));
        c.apply_source(&attrs);
        assert_eq!(c, ColorConfig::new(grey(10), grey(250)));
    }

    #[test]
    fn insert_hex_reports_bad_input() {
        let mut attrs = AttributeSet::new();
        assert!(attrs.insert_hex(BASE_COLOR_ATTR, "#ffe0e0e0").is_ok());
        assert_eq!(attrs.insert_hex(HIGHLIGHT_COLOR_ATTR, "fff"), Err(ColorParseError::MissingHash));
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.color(BASE_COLOR_ATTR), Some(Color::from_argb_u32(0xffe0e0e0)));
    }
}
