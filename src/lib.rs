//! Conway's Game of Life engine
//!
//! A fixed-size grid advanced one generation at a time, with an explicit
//! boundary policy and seedable random initialization.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod runner;
pub mod utils;

pub use config::{BoundaryPolicy, Settings};
pub use error::{EngineError, EngineResult};
pub use game_of_life::{Grid, GridEngine};

use anyhow::{Context, Result};

/// Build an engine as described by `settings`: from a pattern file when one
/// is configured, otherwise empty or randomly seeded.
pub fn build_engine(settings: &Settings) -> Result<GridEngine> {
    let grid = &settings.grid;

    if let Some(ref pattern) = settings.input.pattern_file {
        let loaded = game_of_life::load_grid_from_file(pattern, grid.boundary_policy)?;
        return Ok(GridEngine::from_grid(loaded));
    }

    let mut engine = GridEngine::with_policy(grid.rows, grid.cols, grid.boundary_policy)
        .context("Failed to create grid")?;

    if settings.seeding.randomize {
        let density = settings.seeding.density;
        match settings.seeding.seed {
            Some(seed) => {
                use rand::SeedableRng;
                let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
                engine.randomize_with(&mut rng, density)?;
            }
            None => engine.randomize_with(&mut rand::thread_rng(), density)?,
        }
    }

    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_engine_seeded_matches_engine() {
        let mut settings = Settings::default();
        settings.grid.rows = 12;
        settings.grid.cols = 15;
        settings.seeding.seed = Some(5);

        let built = build_engine(&settings).unwrap();
        let direct = GridEngine::seeded(12, 15, BoundaryPolicy::Toroidal, 5).unwrap();
        assert_eq!(built.grid(), direct.grid());
    }

    #[test]
    fn test_build_engine_empty_and_invalid() {
        let mut settings = Settings::default();
        settings.seeding.randomize = false;
        assert_eq!(build_engine(&settings).unwrap().num_of_cells(), 0);

        settings.grid.cols = 0;
        assert!(build_engine(&settings).is_err());
    }

    #[test]
    fn test_build_engine_from_pattern() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("blinker.txt");
        std::fs::write(&path, "000\n111\n000\n").unwrap();

        let mut settings = Settings::default();
        settings.grid.boundary_policy = BoundaryPolicy::Clamped;
        settings.input.pattern_file = Some(path);

        let engine = build_engine(&settings).unwrap();
        assert_eq!((engine.rows(), engine.cols()), (3, 3));
        assert_eq!(engine.boundary(), BoundaryPolicy::Clamped);
        assert_eq!(engine.num_of_cells(), 3);
    }
}
