use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ops::{self, Shift};
use super::spawn;
use rand::Rng;

/// Base of the tile progression. Nonzero cells always hold a positive power
/// of this value: seeds spawned by [`spawn_tiles`](super::spawn_tiles) and
/// doubled merge results alike.
pub const BASE: u64 = 2;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in a fixed order convenient for probing.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Errors raised by grid construction and bulk assignment.
///
/// Shape and value violations are raised at the point of the offending call
/// and never silently coerce or truncate data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1, requested {width}x{height}")]
    InvalidDimension { width: usize, height: usize },
    #[error("replacement grid must be {expected_width}x{expected_height}, found a {found_rows}-row grid with a row of length {found_cols}")]
    ShapeMismatch {
        expected_width: usize,
        expected_height: usize,
        found_rows: usize,
        found_cols: usize,
    },
    #[error("cell value {value} is not a tile: nonzero cells must be a positive power of {BASE}")]
    InvalidValue { value: u64 },
    #[error("invalid spawn arguments: {0}")]
    InvalidArgument(String),
}

/// Resizable rectangular board of tile values, `0` meaning empty.
///
/// Cells are indexed `(column, row)` with `0 <= column < width()` and
/// `0 <= row < height()`, stored row-major. The shift transforms return new
/// grids; only [`reset`](Grid::reset), [`resize`](Grid::resize),
/// [`replace_contents`](Grid::replace_contents) and
/// [`spawn_tiles`](Grid::spawn_tiles) mutate in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) cells: Vec<u64>,
}

impl Grid {
    /// Create an all-empty grid of the given positive dimensions.
    ///
    /// ```
    /// use grid_engine::Grid;
    /// let g = Grid::new(4, 4).unwrap();
    /// assert_eq!(g.count_empty(), 16);
    /// assert!(Grid::new(0, 4).is_err());
    /// ```
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimension { width, height });
        }
        Ok(Grid {
            width,
            height,
            cells: vec![0; width * height],
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    // Hard assert: an out-of-range `x` can still flatten to an in-range
    // index that aliases a cell in the next row.
    #[inline]
    pub(crate) fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) out of bounds for a {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Value at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u64 {
        self.cells[self.idx(x, y)]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: usize, y: usize, value: u64) {
        let i = self.idx(x, y);
        self.cells[i] = value;
    }

    /// Clear every cell back to `0`, preserving dimensions.
    pub fn reset(&mut self) {
        self.cells.fill(0);
    }

    /// Change dimensions in place, preserving cell contents at their
    /// coordinates. Growing an axis pads empty cells at the high-index end;
    /// shrinking truncates from the high-index end.
    ///
    /// ```
    /// use grid_engine::Grid;
    /// let mut g = Grid::new(4, 4).unwrap();
    /// let mut rows = vec![vec![0u64; 4]; 4];
    /// rows[1][2] = 8;
    /// g.replace_contents(&rows).unwrap();
    /// g.resize(3, 3).unwrap();
    /// assert_eq!(g.get(2, 1), 8);
    /// g.resize(5, 5).unwrap();
    /// assert_eq!(g.get(2, 1), 8);
    /// assert_eq!(g.get(4, 4), 0);
    /// ```
    pub fn resize(&mut self, new_width: usize, new_height: usize) -> Result<(), GridError> {
        if new_width == 0 || new_height == 0 {
            return Err(GridError::InvalidDimension {
                width: new_width,
                height: new_height,
            });
        }
        let mut cells = vec![0; new_width * new_height];
        for y in 0..self.height.min(new_height) {
            for x in 0..self.width.min(new_width) {
                cells[y * new_width + x] = self.cells[y * self.width + x];
            }
        }
        self.width = new_width;
        self.height = new_height;
        self.cells = cells;
        Ok(())
    }

    /// Bulk-assign cell values from row-major `rows`.
    ///
    /// Fails with `ShapeMismatch` unless `rows` has exactly the configured
    /// row count and every row has exactly the configured column count, and
    /// with `InvalidValue` if any nonzero cell is not a positive power of
    /// [`BASE`]. On failure the grid is left untouched.
    pub fn replace_contents(&mut self, rows: &[Vec<u64>]) -> Result<(), GridError> {
        let mismatch = |found_cols| GridError::ShapeMismatch {
            expected_width: self.width,
            expected_height: self.height,
            found_rows: rows.len(),
            found_cols,
        };
        if rows.len() != self.height {
            return Err(mismatch(rows.first().map_or(0, Vec::len)));
        }
        for row in rows {
            if row.len() != self.width {
                return Err(mismatch(row.len()));
            }
            for &value in row {
                if value != 0 && (!value.is_power_of_two() || value < BASE) {
                    return Err(GridError::InvalidValue { value });
                }
            }
        }
        for (y, row) in rows.iter().enumerate() {
            self.cells[y * self.width..(y + 1) * self.width].copy_from_slice(row);
        }
        Ok(())
    }

    /// Iterate `(x, y, value)` over every cell in row-major order. This is
    /// the feed for rendering surfaces.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % width, i / width, v))
    }

    /// Row-major view of the grid as slices, one per row.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        self.cells.chunks(self.width)
    }

    /// Count the number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Highest tile value on the board (`0` for an all-empty grid).
    pub fn highest_tile(&self) -> u64 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of every cell value. A shift conserves this sum: merging two `v`
    /// tiles leaves one `2v` cell behind.
    pub fn total(&self) -> u64 {
        self.cells.iter().sum()
    }

    /// Slide and merge tiles toward `dir`, returning the candidate grid and
    /// the score delta without touching `self`. See [`shift`](super::shift).
    ///
    /// ```
    /// use grid_engine::{Grid, Move};
    /// let mut g = Grid::new(4, 1).unwrap();
    /// g.replace_contents(&[vec![2, 2, 2, 2]]).unwrap();
    /// let out = g.shift(Move::Right);
    /// assert_eq!(out.grid.rows().next().unwrap(), &[0, 0, 4, 4]);
    /// assert_eq!(out.score, 8);
    /// assert_eq!(g.rows().next().unwrap(), &[2, 2, 2, 2]);
    /// ```
    #[inline]
    pub fn shift(&self, dir: Move) -> Shift {
        ops::shift(self, dir)
    }

    /// True iff no direction changes the board: the loss condition.
    #[inline]
    pub fn is_stuck(&self) -> bool {
        ops::is_stuck(self)
    }

    /// Place up to `count` new tiles on random empty cells. See
    /// [`spawn_tiles`](super::spawn_tiles).
    #[inline]
    pub fn spawn_tiles<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        choices: &[u64],
        weights: Option<&[u32]>,
        rng: &mut R,
    ) -> Result<(), GridError> {
        spawn::spawn_tiles(self, count, choices, weights, rng)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (i, v) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, "|")?;
                }
                match v {
                    0 => write!(f, "{:>6}", ".")?,
                    v => write!(f, "{:>6}", v)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
