//! Monochrome dithering engine for inkdither.
//!
//! Converts RGBA pixel buffers into ink/no-ink buffers and projects
//! them onto coarse glyph grids.

pub mod ascii;
pub mod engine;
pub mod falloff;
pub mod luminance;
pub mod threshold;

pub use ascii::AsciiProjector;
pub use engine::DitherEngine;
