//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::Grid;
use crate::runner::StepReport;
use anyhow::Result;

/// Format grids and step status for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows() * (grid.cols() * 3 + 1));
        for row in grid.cells().chunks(grid.cols()) {
            output.extend(row.iter().map(|&cell| if cell { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.cols() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for (row_idx, row) in grid.cells().chunks(grid.cols()).enumerate() {
            output.push_str(&format!("{:2} ", row_idx));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// The status line a viewer shows under the grid
    pub fn format_status(report: &StepReport) -> String {
        format!("Steps: {}  Alive: {}", report.generation, report.alive)
    }

    /// Render one generation in the requested output format
    pub fn render(grid: &Grid, report: &StepReport, format: OutputFormat) -> Result<String> {
        let rendered = match format {
            OutputFormat::Text => format!(
                "{}\n{}",
                Self::format_status(report),
                crate::game_of_life::io::grid_to_string(grid)
            ),
            OutputFormat::Json => serde_json::to_string(report)?,
            OutputFormat::Visual => format!(
                "{}\n{}",
                Self::format_grid_compact(grid),
                ColorOutput::info(&Self::format_status(report))
            ),
        };
        Ok(rendered)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
