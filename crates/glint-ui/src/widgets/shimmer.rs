use glint_engine::coords::{Rect, Vec2};
use glint_engine::paint::Color;
use glint_engine::time::FrameTime;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::shimmer::{ConfigSource, ShimmerOverlay};
use crate::widget::{Element, Widget};

use super::frame_box::{FrameBox, FrameItem, SizeHint};

/// A [`FrameBox`] whose content shimmers while the widget is attached.
///
/// Painting opens a compositing layer over the widget's bounds, draws the
/// children into it, then lets the [`ShimmerOverlay`] paint its band
/// source-in on top. The layer is accelerated when the host supports it.
///
/// # Example
/// ```rust,ignore
/// Shimmer::new()
///     .colors(Color::from_hex("#e0e0e0")?, Color::from_hex("#f5f5f5")?)
///     .item(FrameItem::new(avatar).at(16.0, 16.0))
///     .item(FrameItem::new(title_bone).at(80.0, 20.0))
/// ```
pub struct Shimmer {
    content: FrameBox,
    overlay: ShimmerOverlay,
}

impl Shimmer {
    pub fn new() -> Self {
        Self { content: FrameBox::new(), overlay: ShimmerOverlay::new() }
    }

    /// Reads the band colors from a host attribute source.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self { content: FrameBox::new(), overlay: ShimmerOverlay::from_source(source) }
    }

    /// Sets both band colors at construction time.
    pub fn colors(mut self, base: Color, highlight: Color) -> Self {
        self.overlay.set_base_color(base);
        self.overlay.set_highlight_color(highlight);
        self.overlay.refresh_colors();
        self
    }

    pub fn item(mut self, item: FrameItem) -> Self {
        self.content = self.content.item(item);
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.content = self.content.child(child);
        self
    }

    pub fn width(mut self, v: SizeHint) -> Self {
        self.content = self.content.width(v);
        self
    }

    pub fn height(mut self, v: SizeHint) -> Self {
        self.content = self.content.height(v);
        self
    }

    #[inline]
    pub fn overlay(&self) -> &ShimmerOverlay {
        &self.overlay
    }

    /// Runtime access to the band: color setters, `start_shimmer`, `stop_shimmer`.
    #[inline]
    pub fn overlay_mut(&mut self) -> &mut ShimmerOverlay {
        &mut self.overlay
    }
}

impl Default for Shimmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Shimmer {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.content.measure(constraints, ctx)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let kind = ShimmerOverlay::layer_kind(painter.caps());
        painter.begin_layer(rect, kind);
        self.content.paint(painter, rect);

        // The overlay works in local coordinates.
        let count = painter.save();
        painter.translate(rect.origin.x, rect.origin.y);
        self.overlay.on_draw(painter);
        painter.restore_to_count(count);

        painter.end_layer();
    }

    fn on_attach(&mut self) {
        self.content.on_attach();
        self.overlay.on_attached_to_host();
    }

    fn on_detach(&mut self) {
        self.overlay.on_detached_from_host();
        self.content.on_detach();
    }

    fn on_layout(&mut self, rect: Rect, ctx: &LayoutCtx) {
        self.content.on_layout(rect, ctx);
        self.overlay.on_layout(rect.size.x, rect.size.y);
    }

    fn on_frame(&mut self, frame: &FrameTime) {
        self.content.on_frame(frame);
        self.overlay.on_frame(frame.now);
    }

    fn take_repaint(&mut self) -> bool {
        let content = self.content.take_repaint();
        self.overlay.take_repaint() || content
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use glint_engine::render::{CpuRenderer, Pixmap};
    use glint_engine::scene::{DrawCmd, DrawList, LayerKind};

    use super::*;
    use crate::constraints::HostCaps;
    use crate::widgets::Container;

    const BASE: u32 = 0xFF_C8C8C8;
    const HIGHLIGHT: u32 = 0xFF_F0F0F0;

    fn frame_at(now: Instant) -> FrameTime {
        FrameTime { dt: 0.0, now, frame_index: 0 }
    }

    /// 40x10 shimmer whose only content is a 10x10 block at x = 20.
    fn block() -> Shimmer {
        Shimmer::new()
            .colors(Color::from_argb_u32(BASE), Color::from_argb_u32(HIGHLIGHT))
            .item(
                FrameItem::new(Container::new().min_size(10.0, 10.0).background(Color::white()))
                    .at(20.0, 0.0),
            )
    }

    fn paint(shimmer: &Shimmer, rect: Rect, ctx: LayoutCtx) -> DrawList {
        let mut list = DrawList::new();
        shimmer.paint(&mut Painter::new(&mut list, ctx), rect);
        list
    }

    fn render(list: &mut DrawList) -> Pixmap {
        let mut target = Pixmap::new(40, 10).unwrap();
        CpuRenderer::new().render(list, &mut target).unwrap();
        target
    }

    // ── recording ─────────────────────────────────────────────────────────

    #[test]
    fn paint_wraps_content_and_band_in_a_layer() {
        let mut s = block();
        let rect = Rect::new(0.0, 0.0, 40.0, 10.0);
        s.on_layout(rect, &LayoutCtx::default());
        let list = paint(&s, rect, LayoutCtx::default());

        let cmds: Vec<&DrawCmd> = list.items().iter().map(|i| &i.cmd).collect();
        assert_eq!(cmds.len(), 4);
        assert!(matches!(cmds[0], DrawCmd::BeginLayer(l) if l.kind == LayerKind::Accelerated));
        assert!(matches!(cmds[1], DrawCmd::Rect(_)));
        assert!(matches!(cmds[2], DrawCmd::Rect(_)));
        assert!(matches!(cmds[3], DrawCmd::EndLayer));
        assert_eq!(list.open_layers(), 0);
        assert_eq!(list.translation(), Vec2::zero());
    }

    #[test]
    fn software_layer_without_acceleration() {
        let s = block();
        let ctx = LayoutCtx::with_caps(HostCaps::SOFTWARE);
        let list = paint(&s, Rect::new(0.0, 0.0, 40.0, 10.0), ctx);
        assert!(matches!(&list.items()[0].cmd, DrawCmd::BeginLayer(l) if l.kind == LayerKind::Software));
    }

    #[test]
    fn band_follows_widget_origin() {
        let mut s = block();
        let rect = Rect::new(100.0, 50.0, 40.0, 10.0);
        s.on_layout(rect, &LayoutCtx::default());
        let list = paint(&s, rect, LayoutCtx::default());

        match &list.items()[2].cmd {
            // Fraction 0: shifted one width left of the origin.
            DrawCmd::Rect(c) => assert_eq!(c.rect.ltrb(), [100.0 - 40.0 - 80.0, 30.0, 220.0, 90.0]),
            other => panic!("expected band rect, got {other:?}"),
        }
    }

    // ── compositing ───────────────────────────────────────────────────────

    #[test]
    fn band_only_lights_drawn_content() {
        let mut s = block();
        let rect = Rect::new(0.0, 0.0, 40.0, 10.0);
        s.on_layout(rect, &LayoutCtx::default());

        let mut list = paint(&s, rect, LayoutCtx::default());
        let target = render(&mut list);

        // Fraction 0 puts the highlight far left; the block shows the base color.
        let [base, ..] = Color::from_argb_u32(BASE).to_rgba8();
        let [shown, ..] = target.pixel(25, 5).to_rgba8();
        assert!(shown.abs_diff(base) <= 1, "{shown} vs {base}");
        assert_eq!(target.pixel(5, 5), Color::transparent());
        assert_eq!(target.pixel(35, 5), Color::transparent());
    }

    #[test]
    fn band_lights_content_mid_sweep() {
        let t0 = Instant::now();
        let mut s = block();
        let rect = Rect::new(0.0, 0.0, 40.0, 10.0);
        s.on_layout(rect, &LayoutCtx::default());
        s.on_attach();
        s.on_frame(&frame_at(t0));
        s.on_frame(&frame_at(t0 + Duration::from_millis(600)));

        let mut list = paint(&s, rect, LayoutCtx::default());
        let target = render(&mut list);

        // Highlight sits near x = 24 at this point of the sweep.
        let [base, ..] = Color::from_argb_u32(BASE).to_rgba8();
        let [lit, ..] = target.pixel(25, 5).to_rgba8();
        assert!(lit > base + 10, "{lit} vs {base}");
        assert_eq!(target.pixel(5, 5), Color::transparent());
        assert_eq!(target.pixel(35, 5), Color::transparent());
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn attach_frame_detach() {
        let t0 = Instant::now();
        let mut s = block();
        s.on_attach();
        assert!(s.overlay().is_shimmer_started());
        s.take_repaint();

        s.on_frame(&frame_at(t0));
        assert!(s.take_repaint());

        s.on_detach();
        assert!(!s.overlay().is_shimmer_started());
        s.on_frame(&frame_at(t0 + Duration::from_millis(16)));
        assert!(!s.take_repaint());
    }

    #[test]
    fn overlay_mut_controls_a_running_widget() {
        let t0 = Instant::now();
        let mut s = block();
        s.on_attach();

        s.overlay_mut().stop_shimmer();
        assert!(!s.overlay().is_shimmer_started());
        s.take_repaint();
        s.on_frame(&frame_at(t0));
        assert!(!s.take_repaint());

        s.overlay_mut().start_shimmer();
        assert!(s.overlay().is_shimmer_started());
        s.on_frame(&frame_at(t0 + Duration::from_millis(16)));
        assert!(s.take_repaint());

        // New colors reach the band after a refresh and the next layout.
        let red = Color::from_argb_u32(0xFF_FF0000);
        s.overlay_mut().set_base_color(red);
        assert_eq!(s.overlay().colors()[0], Color::from_argb_u32(BASE));
        s.overlay_mut().refresh_colors();
        s.on_layout(Rect::new(0.0, 0.0, 40.0, 10.0), &LayoutCtx::default());
        let stops = &s.overlay().gradient().unwrap().stops;
        assert_eq!(stops[0].color, red);
        assert_eq!(stops[2].color, red);
    }
}
