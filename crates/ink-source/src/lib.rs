//! Image decoding and encoding for inkdither.

pub mod image;
