//! inkdither application layer: CLI, session state, watch loop, outputs.

pub mod cli;
pub mod hotreload;
pub mod output;
pub mod session;
