use std::fmt;

use anyhow::{Context, Result};

use crate::paint::Color;

use super::cpu::skia_color;

/// CPU render target backed by a `tiny_skia::Pixmap`.
///
/// Premultiplied RGBA8, row-major, top-left origin. One pixel covers one
/// logical pixel.
pub struct Pixmap {
    inner: tiny_skia::Pixmap,
}

impl Pixmap {
    /// Fully transparent pixmap. Fails for a zero or oversized dimension.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let inner = tiny_skia::Pixmap::new(width, height)
            .with_context(|| format!("cannot allocate a {width}x{height} pixmap"))?;
        Ok(Self { inner })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Pixel at `(x, y)`; transparent outside the pixmap.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.inner
            .pixel(x, y)
            .map(|p| {
                let q = |v: u8| v as f32 / 255.0;
                Color::from_premul(q(p.red()), q(p.green()), q(p.blue()), q(p.alpha()))
            })
            .unwrap_or_default()
    }

    pub fn fill(&mut self, c: Color) {
        self.inner.fill(skia_color(c));
    }

    /// Straight-alpha RGBA8 bytes, row-major, ready for an image encoder.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.inner
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    #[inline]
    pub(crate) fn as_skia_mut(&mut self) -> &mut tiny_skia::Pixmap {
        &mut self.inner
    }
}

impl fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pixmap").field("width", &self.width()).field("height", &self.height()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_transparent() {
        let p = Pixmap::new(3, 2).unwrap();
        assert_eq!(p.pixel(2, 1), Color::transparent());
        assert_eq!(p.to_rgba8().len(), 3 * 2 * 4);
    }

    #[test]
    fn zero_size_is_an_error() {
        assert!(Pixmap::new(0, 4).is_err());
    }

    #[test]
    fn out_of_range_reads_are_transparent() {
        let mut p = Pixmap::new(2, 2).unwrap();
        p.fill(Color::white());
        assert_eq!(p.pixel(5, 0), Color::transparent());
        assert_eq!(p.pixel(1, 1), Color::white());
    }

    #[test]
    fn rgba8_is_straight_alpha() {
        let mut p = Pixmap::new(2, 1).unwrap();
        p.fill(Color::from_straight(1.0, 0.0, 0.0, 0.5));
        let bytes = p.to_rgba8();
        assert_eq!(bytes.len(), 8);
        assert_eq!(bytes[0], 255);
        assert!(bytes[3].abs_diff(128) <= 1);
    }
}
