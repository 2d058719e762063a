//! Engine module: resizable merge-puzzle grid, directional compaction and
//! weighted tile spawning. Public API stays small and ergonomic.
//!
//! - `Grid` is the resizable board state with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - The compaction walker and the spawn procedure live in submodules to
//!   keep things tidy.

mod ops;
mod spawn;
pub mod state;

pub use state::{Grid, GridError, Move, BASE};

pub use ops::{is_stuck, shift, Shift};
pub use spawn::spawn_tiles;
