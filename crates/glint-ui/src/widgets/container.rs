use glint_engine::coords::{Rect, Vec2};
use glint_engine::paint::Paint;
use glint_engine::time::FrameTime;

use crate::constraints::{Constraints, Edges, LayoutCtx};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// A single-child widget that applies padding, background and corner rounding.
///
/// With a background and a minimum size and no child it is a placeholder
/// "bone" for skeleton layouts.
///
/// # Example
/// ```rust,ignore
/// Container::new()
///     .min_size(120.0, 12.0)
///     .background(Color::from_srgb_u8(224, 224, 224, 255))
///     .corner_radius(4.0)
/// ```
pub struct Container {
    child: Option<Element>,
    padding: Edges,
    background: Option<Paint>,
    corner_radius: f32,
    min_width: f32,
    min_height: f32,
}

impl Container {
    pub fn new() -> Self {
        Self {
            child: None,
            padding: Edges::default(),
            background: None,
            corner_radius: 0.0,
            min_width: 0.0,
            min_height: 0.0,
        }
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.child = Some(child.into());
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(mut self, v: f32) -> Self {
        self.padding = Edges::all(v);
        self
    }

    pub fn background(mut self, paint: impl Into<Paint>) -> Self {
        self.background = Some(paint.into());
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.deflate(self.padding);

        let child_size = self
            .child
            .as_ref()
            .map(|c| c.measure(inner, ctx))
            .unwrap_or(Vec2::zero());

        let padded = child_size + self.padding.total();
        constraints.constrain(Vec2::new(padded.x.max(self.min_width), padded.y.max(self.min_height)))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if let Some(bg) = &self.background {
            painter.fill_rounded_rect(rect, self.corner_radius, bg.clone());
        }

        if let Some(child) = &self.child {
            child.paint(painter, self.padding.inset(rect));
        }
    }

    fn on_attach(&mut self) {
        if let Some(child) = &mut self.child {
            child.on_attach();
        }
    }

    fn on_detach(&mut self) {
        if let Some(child) = &mut self.child {
            child.on_detach();
        }
    }

    fn on_layout(&mut self, rect: Rect, ctx: &LayoutCtx) {
        if let Some(child) = &mut self.child {
            child.on_layout(self.padding.inset(rect), ctx);
        }
    }

    fn on_frame(&mut self, frame: &FrameTime) {
        if let Some(child) = &mut self.child {
            child.on_frame(frame);
        }
    }

    fn take_repaint(&mut self) -> bool {
        self.child.as_mut().is_some_and(Element::take_repaint)
    }
}
