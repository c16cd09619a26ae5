use glint_engine::coords::{Rect, Vec2};
use glint_engine::paint::Paint;
use glint_engine::time::FrameTime;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

// ── SizeHint ──────────────────────────────────────────────────────────────

/// Controls how a [`FrameBox`] or one of its children picks a width or height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SizeHint {
    /// Use the measured natural size (default).
    #[default]
    Natural,
    /// Fixed pixel size.
    Px(f32),
    /// Fraction of the parent's dimension (0.0 = 0 %, 1.0 = 100 %).
    Pct(f32),
    /// Equal to the parent's dimension.
    Fill,
}

impl SizeHint {
    #[inline]
    pub fn resolve(self, parent_dim: f32, natural: f32) -> f32 {
        match self {
            SizeHint::Natural => natural,
            SizeHint::Px(v) => v,
            SizeHint::Pct(p) => parent_dim * p,
            SizeHint::Fill => parent_dim,
        }
    }
}

// ── FrameItem ─────────────────────────────────────────────────────────────

/// A child inside a [`FrameBox`], placed at `offset` from the box's top-left.
pub struct FrameItem {
    pub element: Element,
    pub offset: Vec2,
    pub width: SizeHint,
    pub height: SizeHint,
}

impl FrameItem {
    pub fn new(element: impl Into<Element>) -> Self {
        Self {
            element: element.into(),
            offset: Vec2::zero(),
            width: SizeHint::Natural,
            height: SizeHint::Natural,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    pub fn width(mut self, v: SizeHint) -> Self {
        self.width = v;
        self
    }

    pub fn height(mut self, v: SizeHint) -> Self {
        self.height = v;
        self
    }

    /// This item's rect inside `parent`.
    pub fn compute_rect(&self, parent: Rect, ctx: &LayoutCtx) -> Rect {
        let (pw, ph) = (parent.size.x, parent.size.y);
        let natural = self.element.measure(Constraints::loose(Vec2::new(pw, ph)), ctx);

        Rect::new(
            parent.origin.x + self.offset.x,
            parent.origin.y + self.offset.y,
            self.width.resolve(pw, natural.x).max(0.0),
            self.height.resolve(ph, natural.y).max(0.0),
        )
    }
}

// ── FrameBox ──────────────────────────────────────────────────────────────

/// Generic box holding any number of children.
///
/// Children are painted in insertion order (first = bottom, last = top) and
/// receive every lifecycle callback the box receives.
///
/// # Example
/// ```rust,ignore
/// FrameBox::new()
///     .item(FrameItem::new(avatar).at(16.0, 16.0))
///     .item(FrameItem::new(title).at(80.0, 20.0).width(SizeHint::Pct(0.6)))
/// ```
pub struct FrameBox {
    children: Vec<FrameItem>,
    width: SizeHint,
    height: SizeHint,
    background: Option<Paint>,
}

impl FrameBox {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            width: SizeHint::Fill,
            height: SizeHint::Fill,
            background: None,
        }
    }

    pub fn item(mut self, item: FrameItem) -> Self {
        self.children.push(item);
        self
    }

    /// Adds `child` at the box origin with its natural size.
    pub fn child(self, child: impl Into<Element>) -> Self {
        self.item(FrameItem::new(child))
    }

    pub fn width(mut self, v: SizeHint) -> Self {
        self.width = v;
        self
    }

    pub fn height(mut self, v: SizeHint) -> Self {
        self.height = v;
        self
    }

    pub fn background(mut self, paint: impl Into<Paint>) -> Self {
        self.background = Some(paint.into());
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Default for FrameBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for FrameBox {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let pw = if constraints.max.x.is_finite() { constraints.max.x } else { 0.0 };
        let ph = if constraints.max.y.is_finite() { constraints.max.y } else { 0.0 };
        let parent = Rect::new(0.0, 0.0, pw, ph);

        // Natural size: the union of all children, measured from the origin.
        let extent = self
            .children
            .iter()
            .map(|item| item.compute_rect(parent, ctx).max())
            .fold(Vec2::zero(), |acc, m| Vec2::new(acc.x.max(m.x), acc.y.max(m.y)));

        let w = self.width.resolve(pw, extent.x);
        let h = self.height.resolve(ph, extent.y);
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if let Some(bg) = &self.background {
            painter.fill_rect(rect, bg.clone());
        }

        let ctx = painter.layout_ctx();
        for item in &self.children {
            let child_rect = item.compute_rect(rect, &ctx);
            item.element.paint(painter, child_rect);
        }
    }

    fn on_attach(&mut self) {
        for item in &mut self.children {
            item.element.on_attach();
        }
    }

    fn on_detach(&mut self) {
        for item in &mut self.children {
            item.element.on_detach();
        }
    }

    fn on_layout(&mut self, rect: Rect, ctx: &LayoutCtx) {
        for item in &mut self.children {
            let child_rect = item.compute_rect(rect, ctx);
            item.element.on_layout(child_rect, ctx);
        }
    }

    fn on_frame(&mut self, frame: &FrameTime) {
        for item in &mut self.children {
            item.element.on_frame(frame);
        }
    }

    fn take_repaint(&mut self) -> bool {
        // Every child is drained, not just the first one asking.
        self.children
            .iter_mut()
            .fold(false, |any, item| item.element.take_repaint() || any)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::widgets::Container;

    /// Records the lifecycle calls it receives.
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
        repaint: bool,
    }

    impl Widget for Recorder {
        fn measure(&self, _: Constraints, _: &LayoutCtx) -> Vec2 {
            Vec2::new(10.0, 10.0)
        }
        fn paint(&self, _: &mut Painter, _: Rect) {}
        fn on_attach(&mut self) {
            self.log.borrow_mut().push("attach".into());
        }
        fn on_detach(&mut self) {
            self.log.borrow_mut().push("detach".into());
        }
        fn on_layout(&mut self, rect: Rect, _: &LayoutCtx) {
            self.log.borrow_mut().push(format!("layout {} {}", rect.origin.x, rect.size.x));
        }
        fn take_repaint(&mut self) -> bool {
            std::mem::take(&mut self.repaint)
        }
    }

    fn recorder(log: &Rc<RefCell<Vec<String>>>, repaint: bool) -> Recorder {
        Recorder { log: Rc::clone(log), repaint }
    }

    // ── SizeHint ──────────────────────────────────────────────────────────

    #[test]
    fn size_hint_resolves() {
        assert_eq!(SizeHint::Natural.resolve(200.0, 30.0), 30.0);
        assert_eq!(SizeHint::Px(12.0).resolve(200.0, 30.0), 12.0);
        assert_eq!(SizeHint::Pct(0.25).resolve(200.0, 30.0), 50.0);
        assert_eq!(SizeHint::Fill.resolve(200.0, 30.0), 200.0);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn item_rect_uses_offset_and_hint() {
        let item = FrameItem::new(Container::new().min_size(8.0, 4.0))
            .at(10.0, 5.0)
            .width(SizeHint::Pct(0.5));
        let r = item.compute_rect(Rect::new(100.0, 100.0, 80.0, 40.0), &LayoutCtx::default());
        assert_eq!(r, Rect::new(110.0, 105.0, 40.0, 4.0));
    }

    #[test]
    fn natural_size_is_union_of_children() {
        let b = FrameBox::new()
            .width(SizeHint::Natural)
            .height(SizeHint::Natural)
            .item(FrameItem::new(Container::new().min_size(10.0, 10.0)).at(20.0, 0.0))
            .item(FrameItem::new(Container::new().min_size(5.0, 30.0)));
        let size = b.measure(Constraints::loose(Vec2::new(100.0, 100.0)), &LayoutCtx::default());
        assert_eq!(size, Vec2::new(30.0, 30.0));
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn lifecycle_reaches_every_child() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut b = FrameBox::new()
            .item(FrameItem::new(recorder(&log, false)))
            .item(FrameItem::new(recorder(&log, false)).at(4.0, 0.0));

        b.on_attach();
        b.on_layout(Rect::new(0.0, 0.0, 50.0, 50.0), &LayoutCtx::default());
        b.on_detach();

        assert_eq!(
            *log.borrow(),
            vec!["attach", "attach", "layout 0 10", "layout 4 10", "detach", "detach"]
        );
    }

    #[test]
    fn take_repaint_drains_all_children() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut b = FrameBox::new()
            .child(recorder(&log, true))
            .child(recorder(&log, true));

        assert!(b.take_repaint());
        assert!(!b.take_repaint());
    }
}
