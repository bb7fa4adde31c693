//! # sortline
//!
//! Application layer of the Sortline waste sorting simulation: CLI, plant
//! configuration loading, the real-time belt runner and transcript rendering.
//! All sorting decisions live in `sortline-core`.

pub mod belt;
pub mod cli;
pub mod render;
