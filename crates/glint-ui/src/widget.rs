use glint_engine::coords::{Rect, Vec2};
use glint_engine::time::FrameTime;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;

// ── Widget trait ──────────────────────────────────────────────────────────

/// The core trait every UI component implements.
///
/// Besides measuring and painting, a widget receives the host's lifecycle
/// callbacks. Containers forward every callback to their children, so a
/// widget deep in the tree sees the same sequence as the root:
///
/// 1. [`on_attach`](Self::on_attach) once the tree is shown
/// 2. [`on_layout`](Self::on_layout) whenever its bounds are established or change
/// 3. [`on_frame`](Self::on_frame) on every host frame, then
///    [`take_repaint`](Self::take_repaint) to collect repaint requests
/// 4. [`paint`](Self::paint) when the host repaints
/// 5. [`on_detach`](Self::on_detach) once the tree is removed
///
/// # Implementing a custom widget
///
/// ```rust,ignore
/// use glint_ui::prelude::*;
///
/// pub struct Dot { color: Color, size: f32 }
///
/// impl Widget for Dot {
///     fn measure(&self, _constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
///         Vec2::new(self.size, self.size)
///     }
///     fn paint(&self, painter: &mut Painter, rect: Rect) {
///         painter.fill_circle(rect.center(), rect.size.x / 2.0, self.color);
///     }
/// }
/// ```
pub trait Widget: 'static {
    /// Compute the size this widget wants given the available space.
    ///
    /// Must be deterministic: the parent may call `measure` multiple times.
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2;

    /// Draw this widget into `painter` within the bounds of `rect`.
    ///
    /// `rect` is the space allocated by the parent, the same rect last passed
    /// to [`on_layout`](Self::on_layout).
    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// The widget became part of a shown tree.
    fn on_attach(&mut self) {}

    /// The widget was removed from a shown tree.
    fn on_detach(&mut self) {}

    /// Bounds were established or changed.
    fn on_layout(&mut self, _rect: Rect, _ctx: &LayoutCtx) {}

    /// A host frame is being delivered.
    fn on_frame(&mut self, _frame: &FrameTime) {}

    /// Returns and clears this widget's pending repaint request.
    fn take_repaint(&mut self) -> bool {
        false
    }
}

// ── Element ───────────────────────────────────────────────────────────────

/// A type-erased widget: the universal child type for container widgets.
///
/// Any `Widget` converts to `Element` via `From` / `Into`.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.0.measure(constraints, ctx)
    }

    #[inline]
    pub fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.0.paint(painter, rect)
    }

    #[inline]
    pub fn on_attach(&mut self) {
        self.0.on_attach()
    }

    #[inline]
    pub fn on_detach(&mut self) {
        self.0.on_detach()
    }

    #[inline]
    pub fn on_layout(&mut self, rect: Rect, ctx: &LayoutCtx) {
        self.0.on_layout(rect, ctx)
    }

    #[inline]
    pub fn on_frame(&mut self, frame: &FrameTime) {
        self.0.on_frame(frame)
    }

    #[inline]
    pub fn take_repaint(&mut self) -> bool {
        self.0.take_repaint()
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
