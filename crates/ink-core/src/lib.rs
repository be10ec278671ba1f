//! Configuration, types, and shared structures for inkdither.
//!
//! This crate contains the pixel buffer, the ASCII grid, the glyph ramp,
//! configuration loading and the traits shared across the workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::GlyphRamp;
pub use config::{AsciiConfig, DitherConfig, DitherMode, RenderConfig};
pub use error::CoreError;
pub use frame::{AsciiGrid, FrameBuffer};
pub use traits::{RandomSource, Source};
