use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use super::state::{Grid, GridError};

/// Place up to `count` new tiles on random empty cells of `grid`.
///
/// Positions are drawn uniformly without replacement from the currently
/// empty cells, so occupied cells are never overwritten and at most
/// `min(count, empties)` tiles are placed. Values are drawn independently,
/// with replacement, from `choices`: weighted by `weights` when given
/// (relative magnitudes only, no normalization required), uniformly
/// otherwise.
///
/// The RNG is injected so callers can seed deterministically:
///
/// ```
/// use grid_engine::Grid;
/// use rand::{rngs::StdRng, SeedableRng};
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut g = Grid::new(4, 4).unwrap();
/// g.spawn_tiles(2, &[2, 4], Some(&[90, 10]), &mut rng).unwrap();
/// assert_eq!(g.count_empty(), 14);
/// ```
pub fn spawn_tiles<R: Rng + ?Sized>(
    grid: &mut Grid,
    count: usize,
    choices: &[u64],
    weights: Option<&[u32]>,
    rng: &mut R,
) -> Result<(), GridError> {
    if choices.is_empty() {
        return Err(GridError::InvalidArgument(
            "value choices must not be empty".into(),
        ));
    }
    let picker = match weights {
        Some(w) => {
            if w.len() != choices.len() {
                return Err(GridError::InvalidArgument(format!(
                    "{} weights for {} value choices",
                    w.len(),
                    choices.len()
                )));
            }
            Some(WeightedIndex::new(w).map_err(|e| GridError::InvalidArgument(e.to_string()))?)
        }
        None => None,
    };

    let mut empties: Vec<usize> = grid
        .cells
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == 0)
        .map(|(i, _)| i)
        .collect();

    for _ in 0..count.min(empties.len()) {
        let slot = rng.gen_range(0..empties.len());
        let cell = empties.swap_remove(slot);
        let value = match &picker {
            Some(dist) => choices[dist.sample(rng)],
            None => choices[rng.gen_range(0..choices.len())],
        };
        grid.cells[cell] = value;
    }
    Ok(())
}
