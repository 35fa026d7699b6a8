//! The simulation engine: a grid advanced one generation at a time
//!
//! ```
//! use life_engine::{BoundaryPolicy, GridEngine};
//!
//! let mut engine = GridEngine::with_policy(5, 5, BoundaryPolicy::Clamped).unwrap();
//! for col in 1..=3 {
//!     engine.make_alive(2, col).unwrap();
//! }
//! engine.simulate_one_step();
//! assert!(engine.is_alive(1, 2).unwrap());
//! assert_eq!(engine.num_of_cells(), 3);
//! assert_eq!(engine.generation(), 1);
//! ```

use super::rules::GameOfLifeRules;
use super::Grid;
use crate::config::BoundaryPolicy;
use crate::error::{EngineError, EngineResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Probability that a randomized cell starts alive
pub const DEFAULT_DENSITY: f64 = 0.1;

/// Owns the live grid and advances it under the Game of Life rule.
///
/// The next generation is always computed into a scratch buffer and swapped
/// in whole, so queries never see a half-updated grid. The engine does no
/// locking of its own; share it behind a lock if another thread reads it.
#[derive(Debug, Clone)]
pub struct GridEngine {
    grid: Grid,
    scratch: Vec<bool>,
    generation: u64,
}

impl GridEngine {
    /// Create an engine on a toroidal grid, optionally seeded from the thread RNG
    pub fn new(rows: usize, cols: usize, randomize: bool) -> EngineResult<Self> {
        let mut engine = Self::with_policy(rows, cols, BoundaryPolicy::default())?;
        if randomize {
            engine.randomize_with(&mut rand::thread_rng(), DEFAULT_DENSITY)?;
        }
        Ok(engine)
    }

    /// Create an empty engine with an explicit boundary policy
    pub fn with_policy(rows: usize, cols: usize, policy: BoundaryPolicy) -> EngineResult<Self> {
        Grid::new(rows, cols, policy).map(Self::from_grid)
    }

    /// Create a randomly seeded engine whose layout is fixed by `seed`
    pub fn seeded(rows: usize, cols: usize, policy: BoundaryPolicy, seed: u64) -> EngineResult<Self> {
        Self::with_rng(rows, cols, policy, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a randomly seeded engine drawing from an injected generator
    pub fn with_rng<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        policy: BoundaryPolicy,
        rng: &mut R,
    ) -> EngineResult<Self> {
        let mut engine = Self::with_policy(rows, cols, policy)?;
        engine.randomize_with(rng, DEFAULT_DENSITY)?;
        Ok(engine)
    }

    /// Wrap an existing grid, starting the generation count at zero
    pub fn from_grid(grid: Grid) -> Self {
        let scratch = vec![false; grid.cells().len()];
        Self {
            grid,
            scratch,
            generation: 0,
        }
    }

    /// Reseed every cell independently, alive with probability `density`
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> EngineResult<()> {
        if !(0.0..=1.0).contains(&density) {
            return Err(EngineError::InvalidDensity(density));
        }
        let seeded: Vec<bool> = (0..self.scratch.len()).map(|_| rng.gen_bool(density)).collect();
        self.grid.replace_cells(seeded);
        Ok(())
    }

    /// Advance exactly one generation
    pub fn simulate_one_step(&mut self) {
        GameOfLifeRules::evolve_into(&self.grid, &mut self.scratch);
        let next = std::mem::take(&mut self.scratch);
        self.scratch = self.grid.replace_cells(next);
        self.generation += 1;
    }

    /// Advance `steps` generations
    pub fn simulate_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.simulate_one_step();
        }
    }

    /// Alive cells among the eight neighbors of a cell
    pub fn count_alive_neighbors(&self, row: usize, col: usize) -> EngineResult<u8> {
        self.grid.count_neighbors(row, col)
    }

    /// Total number of alive cells
    pub fn num_of_cells(&self) -> usize {
        self.grid.living_count()
    }

    pub fn is_alive(&self, row: usize, col: usize) -> EngineResult<bool> {
        self.grid.get(row, col)
    }

    pub fn make_alive(&mut self, row: usize, col: usize) -> EngineResult<()> {
        self.grid.set(row, col, true)
    }

    pub fn make_dead(&mut self, row: usize, col: usize) -> EngineResult<()> {
        self.grid.set(row, col, false)
    }

    /// Kill every cell; the generation count is left alone
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.grid.boundary_policy()
    }

    /// Generations simulated since this engine was built
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Owned copy of the current generation
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.grid.living_cells()
    }
}
