use glint_engine::coords::{Rect, Vec2};

// ── host context ──────────────────────────────────────────────────────────

/// What the host compositor offers widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCaps {
    /// Compositing layers can be backed by the GPU.
    pub accelerated_layers: bool,
}

impl HostCaps {
    /// Host that composites layers in CPU buffers only.
    pub const SOFTWARE: Self = Self { accelerated_layers: false };
}

impl Default for HostCaps {
    fn default() -> Self {
        Self { accelerated_layers: true }
    }
}

/// Passed to [`Widget::measure`](crate::widget::Widget::measure) and
/// [`Widget::on_layout`](crate::widget::Widget::on_layout).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCtx {
    /// Physical pixels per logical pixel.
    pub scale: f32,
    pub caps: HostCaps,
}

impl LayoutCtx {
    /// Unit scale on a host with `caps`.
    pub fn with_caps(caps: HostCaps) -> Self {
        Self { scale: 1.0, caps }
    }
}

impl Default for LayoutCtx {
    fn default() -> Self {
        Self::with_caps(HostCaps::default())
    }
}

// ── padding ───────────────────────────────────────────────────────────────

/// Per-side insets, used as container padding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    /// Space the insets take up: `(left + right, top + bottom)`.
    #[inline]
    pub fn total(self) -> Vec2 {
        Vec2::new(self.left + self.right, self.top + self.bottom)
    }

    /// `rect` with these insets removed; never negative in size.
    pub fn inset(self, rect: Rect) -> Rect {
        let total = self.total();
        Rect::new(
            rect.origin.x + self.left,
            rect.origin.y + self.top,
            (rect.size.x - total.x).max(0.0),
            (rect.size.y - total.y).max(0.0),
        )
    }
}

// ── measuring ─────────────────────────────────────────────────────────────

/// Size range a parent allows a child during measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    /// Anything from zero up to `max`.
    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    /// Clamps `size` into `[min, max]` per axis.
    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(size.x.max(self.min.x).min(self.max.x), size.y.max(self.min.y).min(self.max.y))
    }

    /// Loose constraints for the content inside `padding`.
    #[must_use]
    pub fn deflate(self, padding: Edges) -> Self {
        let total = padding.total();
        Self::loose(Vec2::new((self.max.x - total.x).max(0.0), (self.max.y - total.y).max(0.0)))
    }
}
