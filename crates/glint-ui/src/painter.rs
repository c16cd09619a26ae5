use glint_engine::coords::{CornerRadii, Rect, Vec2};
use glint_engine::paint::{BlendMode, Paint};
use glint_engine::scene::{DrawList, LayerKind, ZIndex};

use crate::constraints::{HostCaps, LayoutCtx};

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` with a canvas-style API. Transform, clip and
/// blend state live on the list, so a widget that saves, translates and
/// restores leaves its siblings untouched.
pub struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    /// Physical-to-logical pixel ratio for this frame.
    pub scale: f32,
    caps: HostCaps,
    z: i32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, ctx: LayoutCtx) -> Self {
        Self { draw_list, scale: ctx.scale, caps: ctx.caps, z: 0 }
    }

    // ── host ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn caps(&self) -> HostCaps {
        self.caps
    }

    /// Returns a [`LayoutCtx`] matching this painter's host.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx {
        LayoutCtx { scale: self.scale, caps: self.caps }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Axis-aligned rectangle filled with a color or gradient.
    pub fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, paint);
    }

    /// Rounded rectangle. Pass `radius = 0.0` for sharp corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, paint: impl Into<Paint>) {
        let z = self.next_z();
        if radius <= 0.0 {
            self.draw_list.push_rect(z, rect, paint);
        } else {
            self.draw_list.push_rounded_rect(z, rect, CornerRadii::all(radius), paint.into());
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, paint: impl Into<Paint>) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, paint.into());
    }

    // ── transform ─────────────────────────────────────────────────────────

    /// Saves the transform; pass the result to [`restore_to_count`](Self::restore_to_count).
    #[inline]
    pub fn save(&mut self) -> usize {
        self.draw_list.save()
    }

    #[inline]
    pub fn restore_to_count(&mut self, count: usize) {
        self.draw_list.restore_to_count(count);
    }

    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.draw_list.translate(dx, dy);
    }

    // ── blending ──────────────────────────────────────────────────────────

    /// Runs `f` with every draw landing through `mode`.
    pub fn with_blend<R>(&mut self, mode: BlendMode, f: impl FnOnce(&mut Self) -> R) -> R {
        self.draw_list.push_blend(mode);
        let out = f(self);
        self.draw_list.pop_blend();
        out
    }

    // ── layers ────────────────────────────────────────────────────────────

    /// Opens an isolated compositing group. Must be paired with [`end_layer`](Self::end_layer).
    pub fn begin_layer(&mut self, bounds: Rect, kind: LayerKind) {
        let z = self.next_z();
        self.draw_list.begin_layer(z, bounds, kind);
    }

    pub fn end_layer(&mut self) {
        let z = self.next_z();
        self.draw_list.end_layer(z);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    // ── internal ──────────────────────────────────────────────────────────

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
