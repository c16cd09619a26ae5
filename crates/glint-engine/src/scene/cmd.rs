use crate::coords::{Rect, Vec2};
use crate::scene::shapes::circle::CircleCmd;
use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::rounded_rect::RoundedRectCmd;

/// How the host backs an isolated compositing group.
///
/// Both kinds composite identically; the distinction lets a backend pick a
/// GPU render target or fall back to a CPU buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LayerKind {
    Accelerated,
    Software,
}

/// Opens an isolated compositing group.
///
/// Everything recorded until the matching [`DrawCmd::EndLayer`] is drawn into
/// a transparent offscreen target, then composited source-over onto the
/// parent target inside `bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerCmd {
    pub bounds: Rect,
    pub kind: LayerKind,
}

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here and to [`DrawCmd::translated`]
/// - implement push helpers inside that shape module
/// - rasterize it in `render::cpu`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    RoundedRect(RoundedRectCmd),
    Circle(CircleCmd),
    BeginLayer(LayerCmd),
    EndLayer,
}

impl DrawCmd {
    /// Moves the command's geometry (and any positioned paint) by `offset`.
    #[must_use]
    pub fn translated(self, offset: Vec2) -> Self {
        if offset == Vec2::zero() {
            return self;
        }
        match self {
            DrawCmd::Rect(c) => DrawCmd::Rect(RectCmd {
                rect: c.rect.translated(offset),
                paint: c.paint.translated(offset),
            }),
            DrawCmd::RoundedRect(c) => DrawCmd::RoundedRect(RoundedRectCmd {
                rect: c.rect.translated(offset),
                radii: c.radii,
                paint: c.paint.translated(offset),
            }),
            DrawCmd::Circle(c) => DrawCmd::Circle(CircleCmd {
                center: c.center + offset,
                radius: c.radius,
                paint: c.paint.translated(offset),
            }),
            DrawCmd::BeginLayer(l) => DrawCmd::BeginLayer(LayerCmd {
                bounds: l.bounds.translated(offset),
                kind: l.kind,
            }),
            DrawCmd::EndLayer => DrawCmd::EndLayer,
        }
    }
}
