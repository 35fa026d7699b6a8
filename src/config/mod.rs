//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{
    BoundaryPolicy, CliOverrides, GridConfig, InputConfig, OutputConfig, OutputFormat, RunConfig,
    SeedingConfig, Settings,
};
