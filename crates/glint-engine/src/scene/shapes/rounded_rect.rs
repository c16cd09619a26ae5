use crate::coords::{CornerRadii, Rect};
use crate::paint::Paint;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Rounded rectangle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub paint: Paint,
}

impl DrawList {
    /// Records a rounded rectangle draw command.
    #[inline]
    pub fn push_rounded_rect(&mut self, z: ZIndex, rect: Rect, radii: CornerRadii, paint: Paint) {
        self.push(z, DrawCmd::RoundedRect(RoundedRectCmd { rect, radii, paint }));
    }
}
