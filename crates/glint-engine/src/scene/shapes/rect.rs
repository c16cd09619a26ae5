use crate::coords::Rect;
use crate::paint::Paint;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Axis-aligned fill: backgrounds, skeleton bones and the shimmer band.
///
/// `rect` may extend far past the target; only the visible part is rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub paint: Paint,
}

impl DrawList {
    /// Records `rect` filled with `paint` under the current canvas state.
    #[inline]
    pub fn push_rect(&mut self, z: ZIndex, rect: Rect, paint: impl Into<Paint>) {
        self.push(z, DrawCmd::Rect(RectCmd { rect, paint: paint.into() }));
    }
}
