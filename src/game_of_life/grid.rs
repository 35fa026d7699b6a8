//! Grid representation and utilities for Game of Life

use crate::config::BoundaryPolicy;
use crate::error::{EngineError, EngineResult};
use itertools::iproduct;

/// Relative positions of the eight Moore neighbors
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Represents a fixed-size Game of Life grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    boundary_policy: BoundaryPolicy,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(rows: usize, cols: usize, boundary_policy: BoundaryPolicy) -> EngineResult<Self> {
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len > 0)
            .ok_or(EngineError::InvalidDimension { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; len],
            boundary_policy,
        })
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>, boundary_policy: BoundaryPolicy) -> EngineResult<Self> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidDimension { rows, cols });
        }

        // Ragged input has no single column count
        if let Some(bad) = cells.iter().find(|row| row.len() != cols) {
            return Err(EngineError::InvalidDimension { rows, cols: bad.len() });
        }

        Ok(Self {
            rows,
            cols,
            cells: cells.into_iter().flatten().collect(),
            boundary_policy,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.boundary_policy
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> EngineResult<usize> {
        if row < self.rows && col < self.cols {
            Ok(self.index(row, col))
        } else {
            Err(EngineError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: usize, col: usize) -> EngineResult<bool> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.cells[idx])
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: bool) -> EngineResult<()> {
        let idx = self.check_bounds(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Count living neighbors for a cell under the grid's boundary policy
    pub fn count_neighbors(&self, row: usize, col: usize) -> EngineResult<u8> {
        self.check_bounds(row, col)?;
        Ok(self.count_neighbors_unchecked(row, col))
    }

    /// Neighbor count for a cell already known to be in bounds
    pub(crate) fn count_neighbors_unchecked(&self, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| self.is_neighbor_alive(row as isize + dr, col as isize + dc))
            .count() as u8
    }

    /// Check if a neighbor at given coordinates is alive, handling the boundary policy
    fn is_neighbor_alive(&self, row: isize, col: isize) -> bool {
        let rows = self.rows as isize;
        let cols = self.cols as isize;
        match self.boundary_policy {
            BoundaryPolicy::Clamped => {
                if (0..rows).contains(&row) && (0..cols).contains(&col) {
                    self.cells[self.index(row as usize, col as usize)]
                } else {
                    false
                }
            }
            BoundaryPolicy::Toroidal => {
                let wrapped_row = row.rem_euclid(rows) as usize;
                let wrapped_col = col.rem_euclid(cols) as usize;
                self.cells[self.index(wrapped_row, wrapped_col)]
            }
        }
    }

    /// Get all living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.rows, 0..self.cols)
            .filter(|&(row, col)| self.cells[self.index(row, col)])
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Create a copy of the grid with a different boundary policy
    pub fn with_boundary_policy(&self, boundary_policy: BoundaryPolicy) -> Self {
        Self {
            boundary_policy,
            ..self.clone()
        }
    }

    /// Swap in a full replacement generation, returning the old cells
    pub(crate) fn replace_cells(&mut self, next: Vec<bool>) -> Vec<bool> {
        debug_assert_eq!(next.len(), self.cells.len());
        std::mem::replace(&mut self.cells, next)
    }
}
