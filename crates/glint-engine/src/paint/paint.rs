use crate::coords::Vec2;
use crate::paint::Color;
use crate::paint::gradient::LinearGradient;

/// Paint source for filling geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
}

impl Paint {
    /// Moves position-dependent sources by `offset`; solid colors are unchanged.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        match self {
            Paint::Solid(c) => Paint::Solid(*c),
            Paint::LinearGradient(g) => Paint::LinearGradient(g.translated(offset)),
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl From<LinearGradient> for Paint {
    fn from(g: LinearGradient) -> Self {
        Paint::LinearGradient(g)
    }
}

/// Porter-Duff compositing operator used when a fill lands on the target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BlendMode {
    /// Source drawn over destination.
    #[default]
    SrcOver,
    /// Source kept only where the destination is opaque: `Sc * Da`, `Sa * Da`.
    ///
    /// Pixels outside the destination's coverage become transparent.
    SrcIn,
}
