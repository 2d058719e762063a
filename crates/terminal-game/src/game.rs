use grid_engine::engine::BASE;
use grid_engine::{Grid, GridError, Move};
use rand::Rng;

/// Seed values placed by the spawn procedure and their relative weights:
/// 90% a 2, 10% a 4.
pub const SPAWN_CHOICES: [u64; 2] = [BASE, BASE * BASE];
pub const SPAWN_WEIGHTS: [u32; 2] = [90, 10];

/// Reaching `BASE^WINNING_POWER` (2048) while active wins the game.
pub const WINNING_POWER: u32 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Active,
    Won,
    Lost,
    /// Past the winning tile and still playing.
    Endless,
}

/// One running game: the grid, the running score and the state machine,
/// held as separate values and passed explicitly to rendering/persistence.
pub struct Game {
    pub grid: Grid,
    pub score: u64,
    pub state: GameState,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut game = Game {
            grid: Grid::new(width, height)?,
            score: 0,
            state: GameState::Active,
        };
        game.reset(rng)?;
        Ok(game)
    }

    /// Clear the board, place the two starting seed tiles and return to
    /// `Active` with a zero score.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GridError> {
        self.grid.reset();
        self.grid.spawn_tiles(2, &SPAWN_CHOICES[..1], None, rng)?;
        self.score = 0;
        self.state = GameState::Active;
        Ok(())
    }

    /// Apply one directional move. If the shift changes the board, commit
    /// it, add the score delta and spawn one new tile; otherwise the move
    /// is illegal and nothing happens. Returns whether the board changed.
    ///
    /// Moves are only accepted while playing (`Active` or `Endless`).
    pub fn apply_move<R: Rng + ?Sized>(
        &mut self,
        dir: Move,
        rng: &mut R,
    ) -> Result<bool, GridError> {
        if !matches!(self.state, GameState::Active | GameState::Endless) {
            return Ok(false);
        }
        let out = self.grid.shift(dir);
        if out.grid == self.grid {
            return Ok(false);
        }
        self.grid = out.grid;
        self.score += out.score;
        self.grid
            .spawn_tiles(1, &SPAWN_CHOICES, Some(&SPAWN_WEIGHTS), rng)?;
        Ok(true)
    }

    /// Run the win/loss transitions: `Lost` when no direction changes the
    /// board, `Won` when the winning tile is reached while `Active`. The
    /// win check does not demote `Endless`.
    pub fn update_state(&mut self) {
        if self.grid.is_stuck() {
            self.state = GameState::Lost;
            return;
        }
        if self.state == GameState::Active && self.grid.highest_tile() >= BASE.pow(WINNING_POWER) {
            self.state = GameState::Won;
        }
    }

    /// `c` keeps playing past the win screen. Only a won game can enter
    /// endless mode; anywhere else the key does nothing.
    pub fn toggle_endless(&mut self) {
        if self.state == GameState::Won {
            self.state = GameState::Endless;
        }
    }
}
