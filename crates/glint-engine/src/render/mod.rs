//! Rendering backends for recorded draw streams.
//!
//! `cpu` rasterizes a [`DrawList`](crate::scene::DrawList) into a [`Pixmap`]
//! with `tiny-skia`; offline tools and tests render through it.

pub mod cpu;
mod pixmap;

pub use cpu::CpuRenderer;
pub use pixmap::Pixmap;
