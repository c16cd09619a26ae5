//! Glint UI: retained widget tree on top of `glint-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use glint_ui::prelude::*;
//!
//! let bone = Container::new().min_size(160.0, 12.0).background(Color::white()).corner_radius(4.0);
//! let mut ui = UiScene::new(
//!     Shimmer::new()
//!         .colors(Color::from_hex("#e0e0e0")?, Color::from_hex("#f5f5f5")?)
//!         .item(FrameItem::new(bone).at(16.0, 16.0)),
//! );
//! ui.attach();
//!
//! // In your frame callback:
//! if ui.tick(&clock.tick()) {
//!     renderer.render(ui.frame(viewport), &mut pixmap)?;
//! }
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`Widget`](widget::Widget) for any type, then use it anywhere an
//! [`Element`](widget::Element) is accepted. Override the lifecycle callbacks
//! (`on_attach`, `on_layout`, `on_frame`, ...) to animate.

pub mod constraints;
pub mod painter;
pub mod repaint;
pub mod scene;
pub mod shimmer;
pub mod widget;
pub mod widgets;

/// Everything you need to build and extend UI; import this in your component files.
pub mod prelude {
    pub use crate::constraints::{Constraints, Edges, HostCaps, LayoutCtx};
    pub use crate::painter::Painter;
    pub use crate::repaint::RepaintHandle;
    pub use crate::scene::UiScene;
    pub use crate::shimmer::{AttributeSet, ColorConfig, ConfigSource, ShimmerOverlay};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{Container, FrameBox, FrameItem, Shimmer, SizeHint};

    // Re-export the engine primitives everyone needs.
    pub use glint_engine::coords::{CornerRadii, Rect, Vec2};
    pub use glint_engine::paint::{BlendMode, Color, ColorStop, LinearGradient, Paint, SpreadMode};
    pub use glint_engine::time::{FrameClock, FrameTime};
}
