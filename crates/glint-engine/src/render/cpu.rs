use std::fmt;

use anyhow::{Context, Result, bail};
use tiny_skia::{FillRule, GradientStop, Mask, Path, PathBuilder, PixmapPaint, Point, Shader, Transform};

use crate::coords::{CornerRadii, Rect};
use crate::paint::{BlendMode, Color, LinearGradient, Paint, SpreadMode};
use crate::scene::{DrawCmd, DrawList};

use super::Pixmap;

/// Cubic control-point distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// CPU rasterizer for [`DrawList`] streams, built on `tiny-skia`.
///
/// Every fill is anti-aliased. Layers render into a transparent offscreen
/// pixmap the size of the target and are composited source-over inside their
/// bounds when closed, so blend modes such as [`BlendMode::SrcIn`] only see
/// the layer's own content.
#[derive(Default)]
pub struct CpuRenderer {
    /// Pixmaps from closed layers, reused by later layers.
    spare: Vec<tiny_skia::Pixmap>,
}

struct OpenLayer {
    pixmap: tiny_skia::Pixmap,
    bounds: Rect,
}

impl CpuRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterizes `list` onto `target` in paint order.
    ///
    /// Existing target content is kept and drawn over. Fails when the stream
    /// closes a layer that was never opened or leaves one open.
    pub fn render(&mut self, list: &mut DrawList, target: &mut Pixmap) -> Result<()> {
        let mut layers: Vec<OpenLayer> = Vec::new();
        let (w, h) = (target.width(), target.height());

        for item in list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::BeginLayer(l) => {
                    let bounds = match item.clip_rect {
                        Some(clip) => clip.intersect(l.bounds).unwrap_or_default(),
                        None => l.bounds,
                    };
                    log::trace!("begin {:?} layer over {:?}", l.kind, bounds);
                    layers.push(OpenLayer { pixmap: self.take_pixmap(w, h)?, bounds });
                }
                DrawCmd::EndLayer => {
                    let Some(layer) = layers.pop() else {
                        bail!("draw list closes a layer that was never opened");
                    };
                    let parent = match layers.last_mut() {
                        Some(open) => &mut open.pixmap,
                        None => target.as_skia_mut(),
                    };
                    composite_layer(parent, &layer.pixmap, layer.bounds);
                    self.spare.push(layer.pixmap);
                }
                cmd => {
                    let dst = match layers.last_mut() {
                        Some(open) => &mut open.pixmap,
                        None => target.as_skia_mut(),
                    };
                    fill_shape(dst, cmd, item.clip_rect, item.blend);
                }
            }
        }

        if !layers.is_empty() {
            bail!("draw list leaves {} layer(s) open", layers.len());
        }
        Ok(())
    }

    fn take_pixmap(&mut self, w: u32, h: u32) -> Result<tiny_skia::Pixmap> {
        match self.spare.pop() {
            Some(mut p) if p.width() == w && p.height() == h => {
                p.fill(tiny_skia::Color::TRANSPARENT);
                Ok(p)
            }
            _ => tiny_skia::Pixmap::new(w, h).with_context(|| format!("cannot allocate a {w}x{h} layer")),
        }
    }
}

impl fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpuRenderer").field("spare", &self.spare.len()).finish()
    }
}

// ── shapes ────────────────────────────────────────────────────────────────

fn fill_shape(dst: &mut tiny_skia::Pixmap, cmd: &DrawCmd, clip: Option<Rect>, blend: BlendMode) {
    let mask = match clip {
        // An empty clip hides the fill entirely.
        Some(clip) => match clip_mask(dst.width(), dst.height(), clip) {
            Some(m) => Some(m),
            None => return,
        },
        None => None,
    };

    let (shape, paint) = match cmd {
        DrawCmd::Rect(c) => {
            // Only the visible part is filled; the shader keeps canvas coordinates.
            let visible = Rect::new(0.0, 0.0, dst.width() as f32, dst.height() as f32);
            let Some(rect) = visible.intersect(c.rect.normalized()).and_then(skia_rect) else {
                return;
            };
            let Some(paint) = skia_paint(&c.paint, blend) else {
                return;
            };
            dst.fill_rect(rect, &paint, Transform::identity(), mask.as_ref());
            return;
        }
        DrawCmd::RoundedRect(c) => (rounded_rect_path(c.rect, c.radii), &c.paint),
        DrawCmd::Circle(c) => (PathBuilder::from_circle(c.center.x, c.center.y, c.radius), &c.paint),
        DrawCmd::BeginLayer(_) | DrawCmd::EndLayer => return,
    };

    let (Some(path), Some(paint)) = (shape, skia_paint(paint, blend)) else {
        return;
    };
    dst.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), mask.as_ref());
}

fn rounded_rect_path(rect: Rect, radii: CornerRadii) -> Option<Path> {
    let r = rect.normalized();
    if radii.is_zero() {
        return skia_rect(r).map(PathBuilder::from_rect);
    }

    let limit = r.size.x.min(r.size.y) * 0.5;
    let k = |v: f32| v.clamp(0.0, limit);
    let (tl, tr, br, bl) = (k(radii.top_left), k(radii.top_right), k(radii.bottom_right), k(radii.bottom_left));
    let (x0, y0) = (r.origin.x, r.origin.y);
    let max = r.max();
    let (x1, y1) = (max.x, max.y);
    let c = 1.0 - KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(x0 + tl, y0);
    pb.line_to(x1 - tr, y0);
    pb.cubic_to(x1 - tr * c, y0, x1, y0 + tr * c, x1, y0 + tr);
    pb.line_to(x1, y1 - br);
    pb.cubic_to(x1, y1 - br * c, x1 - br * c, y1, x1 - br, y1);
    pb.line_to(x0 + bl, y1);
    pb.cubic_to(x0 + bl * c, y1, x0, y1 - bl * c, x0, y1 - bl);
    pb.line_to(x0, y0 + tl);
    pb.cubic_to(x0, y0 + tl * c, x0 + tl * c, y0, x0 + tl, y0);
    pb.close();
    pb.finish()
}

fn composite_layer(parent: &mut tiny_skia::Pixmap, layer: &tiny_skia::Pixmap, bounds: Rect) {
    let Some(mask) = clip_mask(parent.width(), parent.height(), bounds) else {
        return;
    };
    parent.draw_pixmap(0, 0, layer.as_ref(), &PixmapPaint::default(), Transform::identity(), Some(&mask));
}

/// Coverage mask for `clip`; `None` when the clip is empty.
fn clip_mask(w: u32, h: u32, clip: Rect) -> Option<Mask> {
    let rect = skia_rect(clip.normalized())?;
    let mut mask = Mask::new(w, h)?;
    mask.fill_path(&PathBuilder::from_rect(rect), FillRule::Winding, true, Transform::identity());
    Some(mask)
}

// ── conversion ────────────────────────────────────────────────────────────

fn skia_rect(r: Rect) -> Option<tiny_skia::Rect> {
    if r.is_empty() {
        return None;
    }
    let max = r.max();
    tiny_skia::Rect::from_ltrb(r.origin.x, r.origin.y, max.x, max.y)
}

/// Straight-alpha `tiny_skia` color for a premultiplied [`Color`].
pub(super) fn skia_color(c: Color) -> tiny_skia::Color {
    let (r, g, b, a) = c.clamped().to_straight();
    let q = |v: f32| v.clamp(0.0, 1.0);
    tiny_skia::Color::from_rgba(q(r), q(g), q(b), q(a)).unwrap_or(tiny_skia::Color::TRANSPARENT)
}

fn skia_spread(mode: SpreadMode) -> tiny_skia::SpreadMode {
    match mode {
        SpreadMode::Pad => tiny_skia::SpreadMode::Pad,
        SpreadMode::Repeat => tiny_skia::SpreadMode::Repeat,
        SpreadMode::Reflect => tiny_skia::SpreadMode::Reflect,
    }
}

fn skia_blend(mode: BlendMode) -> tiny_skia::BlendMode {
    match mode {
        BlendMode::SrcOver => tiny_skia::BlendMode::SourceOver,
        BlendMode::SrcIn => tiny_skia::BlendMode::SourceIn,
    }
}

fn skia_shader(paint: &Paint) -> Option<Shader<'static>> {
    match paint {
        Paint::Solid(c) => Some(Shader::SolidColor(skia_color(*c))),
        Paint::LinearGradient(g) => gradient_shader(g),
    }
}

/// `None` for gradients that cannot be drawn: fewer than two stops, a
/// degenerate axis or non-finite values.
fn gradient_shader(g: &LinearGradient) -> Option<Shader<'static>> {
    if !g.is_valid() {
        log::trace!("skipping invalid gradient {g:?}");
        return None;
    }
    let stops = g.stops.iter().map(|s| GradientStop::new(s.t, skia_color(s.color))).collect();
    tiny_skia::LinearGradient::new(
        Point::from_xy(g.start.x, g.start.y),
        Point::from_xy(g.end.x, g.end.y),
        stops,
        skia_spread(g.spread),
        Transform::identity(),
    )
}

fn skia_paint(paint: &Paint, blend: BlendMode) -> Option<tiny_skia::Paint<'static>> {
    Some(tiny_skia::Paint {
        shader: skia_shader(paint)?,
        blend_mode: skia_blend(blend),
        anti_alias: true,
        ..tiny_skia::Paint::default()
    })
}
