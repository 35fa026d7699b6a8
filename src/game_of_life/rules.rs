//! Game of Life rules implementation

use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Compute the next generation of `current` into `next`.
    ///
    /// Every count is taken against `current`, so no cell can observe another
    /// cell's next-generation value. `next` must hold `rows * cols` cells.
    pub fn evolve_into(current: &Grid, next: &mut [bool]) {
        debug_assert_eq!(next.len(), current.cells().len());
        let cols = current.cols();

        // Use parallel processing for better performance on large grids
        next.par_chunks_mut(cols)
            .zip(current.cells().par_chunks(cols))
            .enumerate()
            .for_each(|(row, (next_row, current_row))| {
                for (col, (next_cell, &alive)) in
                    next_row.iter_mut().zip(current_row).enumerate()
                {
                    let neighbors = current.count_neighbors_unchecked(row, col);
                    *next_cell = Self::should_be_alive(alive, neighbors);
                }
            });
    }

    /// Apply Game of Life rules to evolve the grid one generation forward
    pub fn evolve(current: &Grid) -> Grid {
        let mut next = current.clone();
        let mut cells = vec![false; current.cells().len()];
        Self::evolve_into(current, &mut cells);
        next.replace_cells(cells);
        next
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }
}
