//! Terminal driver for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use life_engine::{
    build_engine,
    config::{BoundaryPolicy, CliOverrides, OutputFormat, Settings},
    game_of_life::{
        create_example_grids, io::load_grids_from_directory, load_grid_from_file, save_grid_to_file,
        GridEngine,
    },
    runner::{self, Runner, RunnerConfig, SharedEngine, StepReport},
    utils::{ColorOutput, GridFormatter},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "life_engine")]
#[command(about = "Conway's Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Toroidal,
    Clamped,
}

impl From<PolicyArg> for BoundaryPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Toroidal => BoundaryPolicy::Toroidal,
            PolicyArg::Clamped => BoundaryPolicy::Clamped,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Visual,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Visual => OutputFormat::Visual,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid rows (overrides config)
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns (overrides config)
        #[arg(long)]
        cols: Option<usize>,

        /// Boundary policy (overrides config)
        #[arg(short, long, value_enum)]
        boundary: Option<PolicyArg>,

        /// Number of generations to run (overrides config)
        #[arg(short, long)]
        steps: Option<usize>,

        /// Delay between generations in milliseconds (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Random seed for reproducible runs (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Pattern file to start from instead of random seeding
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Save the final generation to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Print every generation instead of only the last
        #[arg(long)]
        show_every_step: bool,
    },

    /// Advance a pattern file a fixed number of generations
    Step {
        /// Pattern file to load
        #[arg(short, long)]
        pattern: PathBuf,

        /// Number of generations
        #[arg(short, long, default_value_t = 1)]
        generations: usize,

        /// Boundary policy
        #[arg(short, long, value_enum, default_value = "toroidal")]
        boundary: PolicyArg,

        /// Write the result here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize every pattern file in a directory
    Patterns {
        /// Directory holding `.txt` pattern files
        #[arg(short, long, default_value = "patterns")]
        directory: PathBuf,

        /// Generations to advance each pattern before summarizing
        #[arg(short, long, default_value_t = 0)]
        generations: usize,

        /// Boundary policy
        #[arg(short, long, value_enum, default_value = "toroidal")]
        boundary: PolicyArg,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            rows,
            cols,
            boundary,
            steps,
            interval,
            seed,
            pattern,
            output,
            format,
            show_every_step,
        } => {
            let overrides = CliOverrides {
                rows,
                cols,
                boundary_policy: boundary.map(Into::into),
                steps,
                interval_ms: interval,
                seed,
                pattern_file: pattern,
                save_final_state: output,
                format: format.map(Into::into),
            };
            run_command(config, overrides, show_every_step)
        }
        Commands::Step {
            pattern,
            generations,
            boundary,
            output,
        } => step_command(pattern, generations, boundary.into(), output),
        Commands::Patterns {
            directory,
            generations,
            boundary,
        } => patterns_command(directory, generations, boundary.into()),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn print_generation(engine: &GridEngine, format: OutputFormat) -> Result<()> {
    let report = StepReport {
        generation: engine.generation(),
        alive: engine.num_of_cells(),
    };
    println!("{}", GridFormatter::render(engine.grid(), &report, format)?);
    Ok(())
}

/// Print the current generation of a shared engine, holding the read lock only while rendering
fn render_shared(shared: &SharedEngine, format: OutputFormat) -> Result<()> {
    let engine = shared
        .read()
        .map_err(|_| anyhow::anyhow!("engine lock poisoned"))?;
    print_generation(&engine, format)
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, show_every_step: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.run.show_every_step |= show_every_step;
    settings.validate().context("Configuration validation failed")?;

    let engine = build_engine(&settings).context("Failed to build engine")?;
    let format = settings.output.format;
    eprintln!(
        "{}",
        ColorOutput::info(&format!(
            "Running {} generations on a {}x{} {:?} grid",
            settings.run.steps,
            engine.rows(),
            engine.cols(),
            engine.boundary()
        ))
    );

    let shared = runner::share(engine);
    if settings.run.show_every_step {
        render_shared(&shared, format)?;
    }

    let start_time = Instant::now();
    let reader = Arc::clone(&shared);
    let show_every_step = settings.run.show_every_step;
    let handle = Runner::spawn(
        Arc::clone(&shared),
        RunnerConfig::from(&settings.run),
        move |_report| {
            if !show_every_step {
                return;
            }
            if let Err(e) = render_shared(&reader, format) {
                eprintln!("{}", ColorOutput::error(&format!("Failed to render: {:#}", e)));
            }
        },
    );
    let steps = handle.join().context("Simulation loop failed")?;

    let engine = shared
        .read()
        .map_err(|_| anyhow::anyhow!("engine lock poisoned"))?;
    if !settings.run.show_every_step {
        print_generation(&engine, format)?;
    }

    eprintln!(
        "{}",
        ColorOutput::success(&format!(
            "Simulated {} generation(s) in {:.3}s",
            steps,
            start_time.elapsed().as_secs_f64()
        ))
    );

    if let Some(ref path) = settings.output.save_final_state {
        save_grid_to_file(engine.grid(), path)?;
        eprintln!("Final state saved to {}", path.display());
    }

    Ok(())
}

fn step_command(
    pattern: PathBuf,
    generations: usize,
    boundary: BoundaryPolicy,
    output: Option<PathBuf>,
) -> Result<()> {
    let grid = load_grid_from_file(&pattern, boundary)
        .with_context(|| format!("Failed to load pattern from {}", pattern.display()))?;
    let mut engine = GridEngine::from_grid(grid);
    engine.simulate_steps(generations);

    match output {
        Some(path) => {
            save_grid_to_file(engine.grid(), &path)?;
            println!(
                "{}",
                ColorOutput::success(&format!(
                    "Generation {} ({} alive) saved to {}",
                    engine.generation(),
                    engine.num_of_cells(),
                    path.display()
                ))
            );
        }
        None => {
            println!("{}", GridFormatter::format_grid_with_coords(engine.grid()));
            println!("Steps: {}  Alive: {}", engine.generation(), engine.num_of_cells());
        }
    }

    Ok(())
}

/// One line per pattern: name, size and alive count before and after stepping
fn summarize_patterns(
    directory: &PathBuf,
    generations: usize,
    boundary: BoundaryPolicy,
) -> Result<Vec<String>> {
    let grids = load_grids_from_directory(directory, boundary)
        .with_context(|| format!("Failed to load patterns from {}", directory.display()))?;

    Ok(grids
        .into_iter()
        .map(|(name, grid)| {
            let mut engine = GridEngine::from_grid(grid);
            let start_alive = engine.num_of_cells();
            engine.simulate_steps(generations);
            format!(
                "{:<12} {}x{}  alive {} -> {} after {} step(s)",
                name,
                engine.rows(),
                engine.cols(),
                start_alive,
                engine.num_of_cells(),
                generations
            )
        })
        .collect())
}

fn patterns_command(directory: PathBuf, generations: usize, boundary: BoundaryPolicy) -> Result<()> {
    let lines = summarize_patterns(&directory, generations, boundary)?;
    if lines.is_empty() {
        println!("{}", ColorOutput::warning(&format!("No patterns found in {}", directory.display())));
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    // A reproducible clamped-edge variant
    let mut clamped = Settings::default();
    clamped.grid.boundary_policy = BoundaryPolicy::Clamped;
    clamped.seeding.seed = Some(42);
    clamped.to_file(&config_dir.join("clamped.yaml"))?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: life_engine run --config config/default.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_engine",
            "run",
            "--config",
            "test.yaml",
            "--boundary",
            "clamped",
            "--steps",
            "5",
            "--seed",
            "3",
        ]);
        assert!(cli.is_ok());

        let bad = Cli::try_parse_from(["life_engine", "run", "--boundary", "mirror"]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/clamped.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());
    }

    #[test]
    fn test_step_command_writes_result() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("blinker.txt");
        let output = temp_dir.path().join("out/blinker_1.txt");
        std::fs::write(&pattern, "00000\n00000\n01110\n00000\n00000\n").unwrap();

        step_command(pattern, 1, BoundaryPolicy::Clamped, Some(output.clone())).unwrap();

        let stepped = std::fs::read_to_string(output).unwrap();
        assert_eq!(stepped, "00000\n00100\n00100\n00100\n00000\n");
    }

    #[test]
    fn test_run_command_saves_final_state() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("block.txt");
        let output = temp_dir.path().join("final.txt");
        std::fs::write(&pattern, "0000\n0110\n0110\n0000\n").unwrap();

        let overrides = CliOverrides {
            steps: Some(3),
            pattern_file: Some(pattern),
            save_final_state: Some(output.clone()),
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        run_command(temp_dir.path().join("missing.yaml"), overrides, false).unwrap();

        let saved = std::fs::read_to_string(output).unwrap();
        assert_eq!(saved, "0000\n0110\n0110\n0000\n");
    }

    #[test]
    fn test_run_command_prints_every_step() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("blinker.txt");
        let output = temp_dir.path().join("final.txt");
        std::fs::write(&pattern, "000\n111\n000\n").unwrap();

        let overrides = CliOverrides {
            steps: Some(3),
            boundary_policy: Some(BoundaryPolicy::Clamped),
            pattern_file: Some(pattern),
            save_final_state: Some(output.clone()),
            format: Some(OutputFormat::Text),
            ..Default::default()
        };
        run_command(temp_dir.path().join("missing.yaml"), overrides, true).unwrap();

        let saved = std::fs::read_to_string(output).unwrap();
        assert_eq!(saved, "010\n010\n010\n");
    }

    #[test]
    fn test_render_reports_poisoned_lock() {
        let shared = runner::share(GridEngine::with_policy(3, 3, BoundaryPolicy::Clamped).unwrap());
        let writer = Arc::clone(&shared);
        let _ = std::thread::spawn(move || {
            let _guard = writer.write().unwrap();
            panic!("writer died mid-step");
        })
        .join();

        let err = render_shared(&shared, OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("poisoned"));
    }

    #[test]
    fn test_summarize_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();

        let lines = summarize_patterns(&temp_dir.path().to_path_buf(), 2, BoundaryPolicy::Toroidal).unwrap();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("beacon"));
        assert!(lines[2].contains("block") && lines[2].contains("alive 4 -> 4"));
        assert!(lines[3].contains("glider") && lines[3].contains("5x5"));
    }
}
