//! Configuration settings for the Game of Life simulator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub seeding: SeedingConfig,
    pub run: RunConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub boundary_policy: BoundaryPolicy,
}

/// How neighbors are resolved for cells on the grid edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Edges wrap around, so the last row/column neighbors the first
    #[default]
    Toroidal,
    /// Positions outside the grid are not counted
    Clamped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedingConfig {
    pub randomize: bool,
    pub density: f64,
    /// Fixed seed for reproducible runs; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub steps: usize,
    pub interval_ms: u64,
    pub show_every_step: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Optional `0`/`1` pattern file used instead of random seeding
    pub pattern_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_final_state: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                rows: 40,
                cols: 80,
                boundary_policy: BoundaryPolicy::Toroidal,
            },
            seeding: SeedingConfig {
                randomize: true,
                density: crate::game_of_life::DEFAULT_DENSITY,
                seed: None,
            },
            run: RunConfig {
                steps: 100,
                interval_ms: 0,
                show_every_step: false,
            },
            input: InputConfig { pattern_file: None },
            output: OutputConfig {
                format: OutputFormat::Visual,
                save_final_state: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// Not validated here: command line overrides may still fix a bad value,
    /// so callers validate after `merge_with_cli`.
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.rows,
                self.grid.cols
            );
        }

        if !(0.0..=1.0).contains(&self.seeding.density) {
            anyhow::bail!("Seeding density must be between 0.0 and 1.0, got {}", self.seeding.density);
        }

        if let Some(ref pattern) = self.input.pattern_file {
            if !pattern.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.grid.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            self.grid.cols = cols;
        }
        if let Some(policy) = cli_overrides.boundary_policy {
            self.grid.boundary_policy = policy;
        }
        if let Some(steps) = cli_overrides.steps {
            self.run.steps = steps;
        }
        if let Some(interval_ms) = cli_overrides.interval_ms {
            self.run.interval_ms = interval_ms;
        }
        if let Some(seed) = cli_overrides.seed {
            self.seeding.seed = Some(seed);
            self.seeding.randomize = true;
        }
        if let Some(ref pattern) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern.clone());
        }
        if let Some(ref output) = cli_overrides.save_final_state {
            self.output.save_final_state = Some(output.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub boundary_policy: Option<BoundaryPolicy>,
    pub steps: Option<usize>,
    pub interval_ms: Option<u64>,
    pub seed: Option<u64>,
    pub pattern_file: Option<PathBuf>,
    pub save_final_state: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid.boundary_policy, BoundaryPolicy::Toroidal);
        assert_eq!(settings.seeding.density, 0.1);
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.grid.boundary_policy = BoundaryPolicy::Clamped;
        settings.seeding.seed = Some(7);
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_policy_yaml_names() {
        let yaml = serde_yaml::to_string(&BoundaryPolicy::Clamped).unwrap();
        assert_eq!(yaml.trim(), "clamped");
        let parsed: BoundaryPolicy = serde_yaml::from_str("toroidal").unwrap();
        assert_eq!(parsed, BoundaryPolicy::Toroidal);
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.grid.rows = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seeding.density = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.input.pattern_file = Some(PathBuf::from("does/not/exist.txt"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_override_repairs_file_values() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("zero_rows.yaml");

        let mut broken = Settings::default();
        broken.grid.rows = 0;
        broken.to_file(&path).unwrap();

        let mut settings = Settings::from_file(&path).unwrap();
        assert!(settings.validate().is_err());

        settings.merge_with_cli(&CliOverrides {
            rows: Some(10),
            ..Default::default()
        });
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid.rows, 10);
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.seeding.randomize = false;
        let overrides = CliOverrides {
            rows: Some(5),
            cols: Some(6),
            boundary_policy: Some(BoundaryPolicy::Clamped),
            seed: Some(42),
            ..Default::default()
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.grid.rows, 5);
        assert_eq!(settings.grid.cols, 6);
        assert_eq!(settings.grid.boundary_policy, BoundaryPolicy::Clamped);
        assert_eq!(settings.seeding.seed, Some(42));
        assert!(settings.seeding.randomize);
        assert_eq!(settings.run.steps, 100);
    }
}
