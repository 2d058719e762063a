//! Core mechanics for a sliding-tile merge puzzle (2048-style).
//!
//! The [`engine`] module holds a resizable numeric [`Grid`](engine::Grid),
//! the four directional compaction transforms and the weighted random spawn
//! procedure. Everything is a plain in-memory value transform: shifting never
//! mutates its input, so callers can try all four directions to detect a
//! stuck board without committing anything.

pub mod engine;

pub use engine::{Grid, GridError, Move, Shift};
