pub mod container;
pub mod frame_box;
pub mod shimmer;

pub use container::Container;
pub use frame_box::{FrameBox, FrameItem, SizeHint};
pub use shimmer::Shimmer;
