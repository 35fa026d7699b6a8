//! Pattern file I/O for Game of Life grids

use super::Grid;
use crate::config::BoundaryPolicy;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a grid from a text file
/// Format: Each line represents a row, with '1' for alive cells and '0' for dead cells
pub fn load_grid_from_file<P: AsRef<Path>>(path: P, boundary_policy: BoundaryPolicy) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content, boundary_policy)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from a string representation
pub fn parse_grid_from_string(content: &str, boundary_policy: BoundaryPolicy) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid file is empty or contains no valid rows");
    }

    let width = lines[0].len();
    let mut cells = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        if line.len() != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                line.len(),
                width
            );
        }

        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            })
            .collect::<Result<Vec<bool>>>()?;
        cells.push(row);
    }

    Ok(Grid::from_cells(cells, boundary_policy)?)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    // Create parent directories if they don't exist
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to string representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.rows() * (grid.cols() + 1));

    for row in grid.cells().chunks(grid.cols()) {
        result.extend(row.iter().map(|&cell| if cell { '1' } else { '0' }));
        result.push('\n');
    }

    result
}

/// Load every `.txt` pattern in a directory, sorted by file stem
pub fn load_grids_from_directory<P: AsRef<Path>>(
    dir_path: P,
    boundary_policy: BoundaryPolicy,
) -> Result<Vec<(String, Grid)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut grids = Vec::new();

    for entry in dir {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            let filename = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match load_grid_from_file(&path, boundary_policy) {
                Ok(grid) => grids.push((filename, grid)),
                Err(e) => eprintln!("Warning: Failed to load {}: {:#}", path.display(), e),
            }
        }
    }

    grids.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(grids)
}

/// Write a few well-known seed patterns
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        // Spaceship, period 4
        ("glider", "00100\n10100\n01100\n00000\n00000\n"),
        // Oscillator, period 2
        ("blinker", "00000\n00000\n01110\n00000\n00000\n"),
        ("block", "0000\n0110\n0110\n0000\n"),
        ("beacon", "000000\n011000\n011000\n000110\n000110\n000000\n"),
    ];

    for (name, content) in patterns {
        let path = dir.join(format!("{}.txt", name));
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::GridEngine;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let content = "010\n101\n010\n";
        let grid = parse_grid_from_string(content, BoundaryPolicy::Clamped).unwrap();

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.living_cells(), vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_parse_ignores_blank_lines_and_padding() {
        let content = "\n  0110 \n\n0110\n";
        let grid = parse_grid_from_string(content, BoundaryPolicy::Toroidal).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.living_count(), 4);
        assert_eq!(grid.boundary_policy(), BoundaryPolicy::Toroidal);
    }

    #[test]
    fn test_grid_to_string() {
        let cells = vec![vec![false, true, false], vec![true, false, true]];
        let grid = Grid::from_cells(cells, BoundaryPolicy::Clamped).unwrap();

        assert_eq!(grid_to_string(&grid), "010\n101\n");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_grid.txt");

        let cells = vec![vec![true, false, true], vec![false, true, false]];
        let original_grid = Grid::from_cells(cells, BoundaryPolicy::Clamped).unwrap();

        save_grid_to_file(&original_grid, &file_path).unwrap();
        let loaded_grid = load_grid_from_file(&file_path, BoundaryPolicy::Clamped).unwrap();

        assert_eq!(original_grid, loaded_grid);
    }

    #[test]
    fn test_invalid_input() {
        let invalid_content = "010\n1X1\n010\n";
        let err = parse_grid_from_string(invalid_content, BoundaryPolicy::Clamped).unwrap_err();
        assert!(err.to_string().contains("'X'"));

        let inconsistent_content = "010\n11\n010\n";
        assert!(parse_grid_from_string(inconsistent_content, BoundaryPolicy::Clamped).is_err());

        assert!(parse_grid_from_string("", BoundaryPolicy::Clamped).is_err());
        assert!(load_grid_from_file("missing/file.txt", BoundaryPolicy::Clamped).is_err());
    }

    #[test]
    fn test_example_grids_behave() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();

        let grids = load_grids_from_directory(temp_dir.path(), BoundaryPolicy::Toroidal).unwrap();
        let names: Vec<&str> = grids.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["beacon", "blinker", "block", "glider"]);

        for (name, grid) in grids {
            let mut engine = GridEngine::from_grid(grid.clone());
            match name.as_str() {
                "block" => {
                    engine.simulate_one_step();
                    assert_eq!(engine.grid(), &grid);
                }
                "blinker" | "beacon" => {
                    engine.simulate_one_step();
                    assert_ne!(engine.grid(), &grid);
                    engine.simulate_one_step();
                    assert_eq!(engine.grid(), &grid);
                }
                "glider" => {
                    // On a 5x5 torus the glider returns after 4 * 5 generations
                    engine.simulate_steps(20);
                    assert_eq!(engine.grid(), &grid);
                    assert_eq!(engine.num_of_cells(), 5);
                }
                other => panic!("unexpected pattern {}", other),
            }
        }
    }

    #[test]
    fn test_directory_skips_bad_files() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("good.txt"), "01\n10\n").unwrap();
        std::fs::write(temp_dir.path().join("bad.txt"), "0a\n").unwrap();
        std::fs::write(temp_dir.path().join("notes.md"), "ignored").unwrap();

        let grids = load_grids_from_directory(temp_dir.path(), BoundaryPolicy::Clamped).unwrap();
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].0, "good");
    }
}
