use super::error::ColorParseError;

/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// The compositor converts to straight alpha at its boundary.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a color from a packed `0xAARRGGBB` color int.
    ///
    /// This is the layout used by host toolkits that store colors as a single
    /// 32-bit integer; `0` is fully transparent.
    #[inline]
    pub fn from_argb_u32(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_srgb_u8(r, g, b, a)
    }

    /// Parses `#RGB`, `#RRGGBB` or `#AARRGGBB`.
    ///
    /// Short and six-digit forms are opaque. The eight-digit form puts alpha
    /// first, matching [`from_argb_u32`](Self::from_argb_u32).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim().strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(bad));
        }

        let argb = match digits.len() {
            3 => {
                let short = u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::BadLength(3))?;
                let r = (short >> 8) & 0xF;
                let g = (short >> 4) & 0xF;
                let b = short & 0xF;
                0xFF00_0000 | (r * 0x11) << 16 | (g * 0x11) << 8 | (b * 0x11)
            }
            6 => 0xFF00_0000 | u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::BadLength(6))?,
            8 => u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::BadLength(8))?,
            n => return Err(ColorParseError::BadLength(n)),
        };

        Ok(Self::from_argb_u32(argb))
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Straight-alpha RGBA bytes, the layout image encoders expect.
    pub fn to_rgba8(self) -> [u8; 4] {
        let (r, g, b, a) = self.clamped().to_straight();
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(r), q(g), q(b), q(a)]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps all channels to [0, 1] and enforces premultiplication.
    #[inline]
    pub fn clamped(self) -> Self {
        let a = self.a.clamp(0.0, 1.0);

        // Clamp premultiplied rgb so it cannot exceed alpha.
        let r = self.r.clamp(0.0, a);
        let g = self.g.clamp(0.0, a);
        let b = self.b.clamp(0.0, a);

        Self { r, g, b, a }
    }
}
