use glint_engine::coords::{Rect, Vec2};
use glint_engine::scene::DrawList;
use glint_engine::time::FrameTime;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::repaint::RepaintHandle;
use crate::widget::Element;

// ── UiScene ───────────────────────────────────────────────────────────────

/// Host side of a widget tree: owns the root, delivers lifecycle callbacks
/// and records each repaint into a reusable `DrawList`.
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = UiScene::new(Shimmer::new().child(card));
/// ui.attach();
///
/// let mut clock = FrameClock::fixed_rate(60);
/// loop {
///     if ui.tick(&clock.tick()) {
///         let list = ui.frame(viewport);
///         renderer.render(list, &mut pixmap)?;
///     }
/// }
/// ```
pub struct UiScene {
    root: Element,
    ctx: LayoutCtx,
    draw_list: DrawList,
    attached: bool,
    /// Bounds passed to the last `on_layout`.
    laid_out: Option<Rect>,
    repaint: RepaintHandle,
}

impl UiScene {
    pub fn new(root: impl Into<Element>) -> Self {
        Self::with_ctx(root, LayoutCtx::default())
    }

    pub fn with_ctx(root: impl Into<Element>, ctx: LayoutCtx) -> Self {
        let repaint = RepaintHandle::new();
        repaint.request();
        Self {
            root: root.into(),
            ctx,
            draw_list: DrawList::new(),
            attached: false,
            laid_out: None,
            repaint,
        }
    }

    #[inline]
    pub fn ctx(&self) -> LayoutCtx {
        self.ctx
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Shows the tree. Calling it again while attached does nothing.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        log::debug!("ui scene attached");
        self.attached = true;
        self.root.on_attach();
        self.repaint.request();
    }

    /// Removes the tree. Calling it again while detached does nothing.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        log::debug!("ui scene detached");
        self.attached = false;
        self.root.on_detach();
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Delivers a host frame to the tree.
    ///
    /// Returns whether anything asked for a repaint since the last [`frame`](Self::frame).
    /// A detached tree receives no frames.
    pub fn tick(&mut self, frame: &FrameTime) -> bool {
        if self.attached {
            self.root.on_frame(frame);
            if self.root.take_repaint() {
                self.repaint.request();
            }
        }
        self.repaint.is_pending()
    }

    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.repaint.is_pending()
    }

    /// Forces `on_layout` on the next [`frame`](Self::frame).
    pub fn invalidate_layout(&mut self) {
        self.laid_out = None;
        self.repaint.request();
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Measures, lays out (when the viewport changed) and paints the tree.
    ///
    /// The returned list is owned by the scene and valid until the next call.
    #[must_use]
    pub fn frame(&mut self, viewport: Vec2) -> &mut DrawList {
        self.draw_list.clear();

        // ── measure ───────────────────────────────────────────────────────
        // The root always occupies the full viewport; the pre-pass only lets
        // children settle their natural sizes.
        let _ = self.root.measure(Constraints::loose(viewport), &self.ctx);
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);

        // ── layout ────────────────────────────────────────────────────────
        if self.laid_out != Some(rect) {
            log::debug!("ui scene layout {}x{}", viewport.x, viewport.y);
            self.root.on_layout(rect, &self.ctx);
            self.laid_out = Some(rect);
        }

        // ── paint ─────────────────────────────────────────────────────────
        {
            let mut painter = Painter::new(&mut self.draw_list, self.ctx);
            self.root.paint(&mut painter, rect);
        }

        self.repaint.take();
        &mut self.draw_list
    }

    /// Items recorded by the last [`frame`](Self::frame).
    #[inline]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }
}
