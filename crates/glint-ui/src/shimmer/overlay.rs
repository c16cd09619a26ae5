use std::time::{Duration, Instant};

use glint_engine::coords::{Rect, Vec2};
use glint_engine::paint::{BlendMode, Color, LinearGradient, SpreadMode};
use glint_engine::scene::LayerKind;
use glint_engine::time::{AnimationDriver, CubicBezier, DriverTiming, RepeatCount, RepeatMode};

use crate::constraints::HostCaps;
use crate::painter::Painter;
use crate::repaint::RepaintHandle;

use super::config::{ColorConfig, ConfigSource, GRADIENT_POSITIONS};

/// Length of one sweep across the content.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(1000);
/// Pause folded into the end of every sweep.
pub const REPEAT_DELAY: Duration = Duration::from_millis(100);
/// Timing curve of the sweep.
pub const EASE_OUT: CubicBezier = CubicBezier::EASE_OUT;

/// Linear interpolation from `start` to `end`.
#[inline]
pub fn offset(start: f32, end: f32, percent: f32) -> f32 {
    start + (end - start) * percent
}

/// Driver configuration: one cycle covers the sweep plus the repeat delay,
/// looping forever from zero.
pub fn driver_timing() -> DriverTiming {
    let extra = REPEAT_DELAY.as_secs_f32() / ANIMATION_DURATION.as_secs_f32();
    DriverTiming {
        duration: ANIMATION_DURATION + REPEAT_DELAY,
        from: 0.0,
        to: 1.0 + extra,
        easing: EASE_OUT,
        repeat_mode: RepeatMode::Restart,
        repeat_count: RepeatCount::Infinite,
    }
}

/// Moving highlight band painted over already drawn content.
///
/// The overlay owns its colors, band geometry, gradient and animation
/// driver. It does no drawing of its own beyond the band: the host draws
/// children into an isolated layer, then calls [`on_draw`](Self::on_draw),
/// which paints the band source-in so only the children's pixels light up.
///
/// Lifecycle (all driven by the host):
/// - [`on_attached_to_host`](Self::on_attached_to_host) starts the driver
/// - [`on_layout`](Self::on_layout) rebuilds band geometry and gradient
/// - [`on_frame`](Self::on_frame) advances the driver, requesting a repaint
/// - [`on_detached_from_host`](Self::on_detached_from_host) stops it
///
/// Color setters are lazy: they store the color but the band keeps its
/// current colors until the derived sequence is regenerated with
/// [`refresh_colors`](Self::refresh_colors) and a layout pass runs.
#[derive(Debug)]
pub struct ShimmerOverlay {
    config: ColorConfig,
    colors: [Color; 3],
    gradient: Option<LinearGradient>,
    draw_rect: Rect,
    size: Vec2,
    driver: Option<AnimationDriver>,
    repaint: RepaintHandle,
}

impl Default for ShimmerOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl ShimmerOverlay {
    /// Idle overlay with transparent colors.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Idle overlay reading its colors from `source`.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self::build(Some(source))
    }

    fn build(source: Option<&dyn ConfigSource>) -> Self {
        let mut overlay = Self {
            config: ColorConfig::default(),
            colors: ColorConfig::default().gradient_colors(),
            gradient: None,
            draw_rect: Rect::default(),
            size: Vec2::zero(),
            driver: None,
            repaint: RepaintHandle::new(),
        };

        overlay.update_gradient();
        overlay.update_driver();
        overlay.repaint.request();

        if let Some(source) = source {
            overlay.config.apply_source(source);
        }
        overlay.refresh_colors();
        overlay
    }

    /// Overlay with explicit colors and no configuration source.
    pub fn with_colors(base: Color, highlight: Color) -> Self {
        let mut overlay = Self::new();
        overlay.set_base_color(base);
        overlay.set_highlight_color(highlight);
        overlay.refresh_colors();
        overlay
    }

    // ── colors ────────────────────────────────────────────────────────────

    pub fn set_base_color(&mut self, color: Color) {
        self.config.base = color;
    }

    pub fn set_highlight_color(&mut self, color: Color) {
        self.config.highlight = color;
    }

    #[inline]
    pub fn color_config(&self) -> ColorConfig {
        self.config
    }

    /// Regenerates the `[base, highlight, base]` sequence from the stored colors.
    ///
    /// The gradient picks it up on the next [`on_layout`](Self::on_layout).
    pub fn refresh_colors(&mut self) {
        self.colors = self.config.gradient_colors();
    }

    /// Colors the next gradient is built from.
    #[inline]
    pub fn colors(&self) -> [Color; 3] {
        self.colors
    }

    // ── animation ─────────────────────────────────────────────────────────

    /// Starts the sweep unless it is already running.
    pub fn start_shimmer(&mut self) {
        if self.is_shimmer_started() {
            return;
        }
        if let Some(driver) = self.driver.as_mut() {
            log::debug!("shimmer started");
            driver.start();
        }
    }

    /// Stops the sweep if it is running. No repaint is requested afterwards.
    pub fn stop_shimmer(&mut self) {
        if !self.is_shimmer_started() {
            return;
        }
        if let Some(driver) = self.driver.as_mut() {
            log::debug!("shimmer stopped");
            driver.cancel();
        }
    }

    #[inline]
    pub fn is_shimmer_started(&self) -> bool {
        self.driver.as_ref().is_some_and(AnimationDriver::is_started)
    }

    /// Replaces the driver with a freshly configured one, keeping its started state.
    pub fn update_driver(&mut self) {
        let started = match self.driver.as_mut() {
            Some(old) => {
                let started = old.is_started();
                old.cancel();
                old.remove_all_update_listeners();
                started
            }
            None => false,
        };

        let mut driver = AnimationDriver::new(driver_timing());
        let repaint = self.repaint.clone();
        driver.add_update_listener(move |_| repaint.request());
        if started {
            driver.start();
        }
        self.driver = Some(driver);
    }

    /// Eased progress of the current sweep, `0.0` without a driver.
    #[inline]
    pub fn animated_fraction(&self) -> f32 {
        self.driver.as_ref().map_or(0.0, AnimationDriver::animated_fraction)
    }

    #[inline]
    pub fn driver(&self) -> Option<&AnimationDriver> {
        self.driver.as_ref()
    }

    /// Horizontal band offset for the current fraction, in `[-width, width]`.
    #[inline]
    pub fn current_offset(&self) -> f32 {
        offset(-self.size.x, self.size.x, self.animated_fraction())
    }

    // ── host lifecycle ────────────────────────────────────────────────────

    pub fn on_attached_to_host(&mut self) {
        self.start_shimmer();
    }

    pub fn on_detached_from_host(&mut self) {
        self.stop_shimmer();
    }

    /// Delivers a frame timestamp to the driver. Returns whether it advanced.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        self.driver.as_mut().is_some_and(|d| d.tick(now))
    }

    /// Returns and clears the pending repaint request.
    pub fn take_repaint(&mut self) -> bool {
        self.repaint.take()
    }

    #[inline]
    pub fn repaint_handle(&self) -> &RepaintHandle {
        &self.repaint
    }

    /// Bounds changed: band covers `[-2w, -2h]` to `[4w, 4h]` and the gradient is rebuilt.
    pub fn on_layout(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.draw_rect = Rect::from_ltrb(-2.0 * width, -2.0 * height, 4.0 * width, 4.0 * height);
        self.update_gradient();
    }

    fn update_gradient(&mut self) {
        let (w, h) = (self.size.x, self.size.y);
        if w <= 0.0 || h <= 0.0 {
            log::trace!("shimmer gradient kept, size {w}x{h}");
            return;
        }
        self.gradient = Some(LinearGradient::from_colors(
            Vec2::zero(),
            Vec2::new(w / 4.0, 0.0),
            &self.colors,
            &GRADIENT_POSITIONS,
            SpreadMode::Pad,
        ));
    }

    /// Paints the band in local coordinates, after the children.
    ///
    /// Does nothing until a layout pass with a non-empty size has built a gradient.
    pub fn on_draw(&self, painter: &mut Painter) {
        let Some(gradient) = &self.gradient else {
            return;
        };

        let dx = self.current_offset();
        let dy = 0.0;

        let count = painter.save();
        painter.translate(dx, dy);
        painter.with_blend(BlendMode::SrcIn, |p| p.fill_rect(self.draw_rect, gradient.clone()));
        painter.restore_to_count(count);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn draw_rect(&self) -> Rect {
        self.draw_rect
    }

    #[inline]
    pub fn gradient(&self) -> Option<&LinearGradient> {
        self.gradient.as_ref()
    }

    /// Layer the host should composite this overlay's group into.
    pub fn layer_kind(caps: HostCaps) -> LayerKind {
        if caps.accelerated_layers {
            LayerKind::Accelerated
        } else {
            LayerKind::Software
        }
    }
}

#[cfg(test)]
mod tests {
    use glint_engine::paint::Paint;
    use glint_engine::scene::{DrawCmd, DrawList};

    use super::*;
    use crate::constraints::LayoutCtx;
    use crate::shimmer::config::{AttributeSet, BASE_COLOR_ATTR, HIGHLIGHT_COLOR_ATTR};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn grey(v: u8) -> Color {
        Color::from_srgb_u8(v, v, v, 255)
    }

    fn attached() -> ShimmerOverlay {
        let mut o = ShimmerOverlay::with_colors(grey(200), grey(240));
        o.on_attached_to_host();
        o
    }

    // ── start / stop ──────────────────────────────────────────────────────

    #[test]
    fn new_overlay_is_idle() {
        let o = ShimmerOverlay::default();
        assert!(!o.is_shimmer_started());
        assert_eq!(o.animated_fraction(), 0.0);
    }

    #[test]
    fn start_twice_equals_start_once() {
        let t0 = Instant::now();
        let mut o = attached();
        o.on_frame(t0);
        o.on_frame(t0 + ms(300));
        let before = o.animated_fraction();

        // A second start must not restart the sweep.
        o.start_shimmer();
        assert!(o.is_shimmer_started());
        o.on_frame(t0 + ms(300));
        assert_eq!(o.animated_fraction(), before);
    }

    #[test]
    fn stop_twice_equals_stop_once() {
        let mut o = attached();
        o.stop_shimmer();
        o.stop_shimmer();
        assert!(!o.is_shimmer_started());
    }

    // ── offset ────────────────────────────────────────────────────────────

    #[test]
    fn offset_endpoints_are_exact() {
        for w in [1.0_f32, 37.5, 320.0, 1234.567] {
            assert_eq!(offset(-w, w, 0.0), -w);
            assert_eq!(offset(-w, w, 1.0), w);
        }
    }

    #[test]
    fn offset_stays_within_width() {
        let w = 333.3_f32;
        for i in 0..=1000 {
            let dx = offset(-w, w, i as f32 / 1000.0);
            assert!((-w..=w).contains(&dx), "dx {dx} out of range");
        }
    }

    // ── colors ────────────────────────────────────────────────────────────

    #[test]
    fn gradient_is_base_highlight_base() {
        let mut o = ShimmerOverlay::with_colors(grey(100), grey(250));
        o.on_layout(200.0, 40.0);

        let g = o.gradient().expect("gradient after layout");
        let colors: Vec<Color> = g.stops.iter().map(|s| s.color).collect();
        let positions: Vec<f32> = g.stops.iter().map(|s| s.t).collect();
        assert_eq!(colors, vec![grey(100), grey(250), grey(100)]);
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
        assert_eq!(g.start, Vec2::zero());
        assert_eq!(g.end, Vec2::new(50.0, 0.0));
        assert_eq!(g.spread, SpreadMode::Pad);
    }

    #[test]
    fn colors_come_from_source() {
        let attrs = AttributeSet::new()
            .with_color(BASE_COLOR_ATTR, grey(10))
            .with_color(HIGHLIGHT_COLOR_ATTR, grey(90));
        let o = ShimmerOverlay::from_source(&attrs);
        assert_eq!(o.colors(), [grey(10), grey(90), grey(10)]);
    }

    #[test]
    fn missing_attributes_default_to_transparent() {
        let o = ShimmerOverlay::from_source(&AttributeSet::new());
        assert_eq!(o.colors(), [Color::transparent(); 3]);
    }

    #[test]
    fn setters_are_lazy_until_refresh() {
        let mut o = ShimmerOverlay::with_colors(grey(100), grey(250));
        o.set_base_color(grey(10));
        o.set_highlight_color(grey(20));
        o.on_layout(100.0, 10.0);
        assert_eq!(o.color_config(), ColorConfig::new(grey(10), grey(20)));
        assert_eq!(o.gradient().map(|g| g.stops[0].color), Some(grey(100)));

        o.refresh_colors();
        o.on_layout(100.0, 10.0);
        assert_eq!(o.gradient().map(|g| g.stops[1].color), Some(grey(20)));
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn attach_runs_and_detach_silences_driver() {
        let t0 = Instant::now();
        let mut o = ShimmerOverlay::default();
        o.on_attached_to_host();
        assert!(o.is_shimmer_started());
        o.take_repaint();

        assert!(o.on_frame(t0));
        assert!(o.take_repaint());

        o.on_detached_from_host();
        assert!(!o.is_shimmer_started());
        let count = o.repaint_handle().request_count();
        assert!(!o.on_frame(t0 + ms(16)));
        assert!(!o.on_frame(t0 + ms(32)));
        assert!(!o.take_repaint());
        assert_eq!(o.repaint_handle().request_count(), count);
    }

    #[test]
    fn update_driver_keeps_started_state() {
        let mut o = attached();
        o.update_driver();
        assert!(o.is_shimmer_started());
        assert_eq!(o.driver().map(AnimationDriver::listener_count), Some(1));

        o.stop_shimmer();
        o.update_driver();
        assert!(!o.is_shimmer_started());
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn layout_sets_oversized_draw_rect() {
        let mut o = ShimmerOverlay::default();
        o.on_layout(120.0, 30.0);
        assert_eq!(o.draw_rect().ltrb(), [-240.0, -60.0, 480.0, 120.0]);
    }

    #[test]
    fn zero_size_layout_keeps_prior_gradient() {
        let mut o = ShimmerOverlay::with_colors(grey(1), grey(2));
        o.on_layout(0.0, 50.0);
        assert!(o.gradient().is_none());

        o.on_layout(80.0, 20.0);
        let before = o.gradient().cloned();
        o.on_layout(80.0, 0.0);
        assert_eq!(o.gradient().cloned(), before);
        assert_eq!(o.draw_rect().ltrb(), [-160.0, -0.0, 320.0, 0.0]);
    }

    // ── timing ────────────────────────────────────────────────────────────

    #[test]
    fn driver_cycle_is_1100ms() {
        let timing = driver_timing();
        assert_eq!(timing.duration, ms(1100));
        assert!((timing.to - 1.1).abs() < 1e-6);
        assert_eq!(timing.repeat_count, RepeatCount::Infinite);
        assert_eq!(timing.repeat_mode, RepeatMode::Restart);
    }

    #[test]
    fn fraction_reaches_one_at_cycle_end_then_restarts() {
        let t0 = Instant::now();
        let mut o = attached();
        o.on_frame(t0);
        assert_eq!(o.animated_fraction(), 0.0);

        o.on_frame(t0 + ms(550));
        let mid = o.animated_fraction();
        assert!(mid > 0.5 && mid < 1.0, "ease-out is ahead of linear: {mid}");

        o.on_frame(t0 + ms(1100));
        assert_eq!(o.animated_fraction(), 1.0);

        o.on_frame(t0 + ms(1101));
        assert!(o.animated_fraction() < 0.01);
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_before_layout_records_nothing() {
        let o = attached();
        let mut list = DrawList::new();
        o.on_draw(&mut Painter::new(&mut list, LayoutCtx::default()));
        assert!(list.is_empty());
    }

    #[test]
    fn draw_translates_band_source_in() {
        let t0 = Instant::now();
        let mut o = attached();
        o.on_layout(100.0, 20.0);
        o.on_frame(t0);

        let mut list = DrawList::new();
        o.on_draw(&mut Painter::new(&mut list, LayoutCtx::default()));
        assert_eq!(list.translation(), Vec2::zero());
        assert_eq!(list.len(), 1);

        let item = &list.items()[0];
        assert_eq!(item.blend, BlendMode::SrcIn);
        match &item.cmd {
            DrawCmd::Rect(c) => {
                // Fraction 0: band shifted one full width to the left.
                assert_eq!(c.rect.ltrb(), [-300.0, -40.0, 300.0, 80.0]);
                match &c.paint {
                    Paint::LinearGradient(g) => assert_eq!(g.start, Vec2::new(-100.0, 0.0)),
                    other => panic!("expected gradient, got {other:?}"),
                }
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn draw_follows_the_animated_fraction() {
        let t0 = Instant::now();
        let mut o = attached();
        o.on_layout(100.0, 20.0);
        o.on_frame(t0);
        o.on_frame(t0 + ms(600));
        let fraction = o.animated_fraction();
        assert!(fraction > 0.5 && fraction < 1.0, "{fraction}");

        let mut list = DrawList::new();
        o.on_draw(&mut Painter::new(&mut list, LayoutCtx::default()));

        let dx = offset(-100.0, 100.0, fraction);
        assert_eq!(o.current_offset(), dx);
        match &list.items()[0].cmd {
            DrawCmd::Rect(c) => {
                assert_eq!(c.rect.ltrb()[0], -200.0 + dx);
                match &c.paint {
                    Paint::LinearGradient(g) => assert_eq!(g.start, Vec2::new(dx, 0.0)),
                    other => panic!("expected gradient, got {other:?}"),
                }
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn layer_kind_follows_host_caps() {
        assert_eq!(
            ShimmerOverlay::layer_kind(HostCaps { accelerated_layers: true }),
            LayerKind::Accelerated
        );
        assert_eq!(
            ShimmerOverlay::layer_kind(HostCaps::SOFTWARE),
            LayerKind::Software
        );
    }
}
