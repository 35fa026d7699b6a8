//! Background run loop that drives an engine on a fixed cadence
//!
//! The engine itself has no notion of time or threads. The runner owns the
//! loop: it takes the write lock only for the duration of one step, so any
//! reader holding the read lock sees a whole generation.

use crate::config::RunConfig;
use crate::game_of_life::GridEngine;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// An engine shared between the runner thread and its readers
pub type SharedEngine = Arc<RwLock<GridEngine>>;

pub fn share(engine: GridEngine) -> SharedEngine {
    Arc::new(RwLock::new(engine))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Minimum wall time per generation
    pub interval: Duration,
    /// Stop after this many steps; `None` runs until stopped
    pub max_steps: Option<usize>,
}

impl From<&RunConfig> for RunnerConfig {
    fn from(run: &RunConfig) -> Self {
        Self {
            interval: Duration::from_millis(run.interval_ms),
            max_steps: Some(run.steps),
        }
    }
}

/// Published after every completed step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub generation: u64,
    pub alive: usize,
}

pub struct Runner;

impl Runner {
    /// Start stepping `engine` on a background thread.
    ///
    /// `on_step` runs on the runner thread after the write lock is released,
    /// so it may take a read lock on the same engine to render it.
    pub fn spawn<F>(engine: SharedEngine, config: RunnerConfig, mut on_step: F) -> RunnerHandle
    where
        F: FnMut(&StepReport) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || -> Result<usize> {
            let mut steps = 0;
            let mut frame_timer = Instant::now();

            while !stop_flag.load(Ordering::Acquire) {
                if config.max_steps.is_some_and(|max| steps >= max) {
                    break;
                }

                let report = {
                    let mut engine = engine
                        .write()
                        .map_err(|_| anyhow!("engine lock poisoned after {} steps", steps))?;
                    engine.simulate_one_step();
                    StepReport {
                        generation: engine.generation(),
                        alive: engine.num_of_cells(),
                    }
                };
                steps += 1;
                on_step(&report);

                let elapsed = frame_timer.elapsed();
                if config.interval > elapsed {
                    thread::sleep(config.interval - elapsed);
                }
                frame_timer = Instant::now();
            }

            Ok(steps)
        });

        RunnerHandle { stop, handle }
    }
}

/// Control handle for a running loop
pub struct RunnerHandle {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<Result<usize>>,
}

impl RunnerHandle {
    /// Whether the loop has exited on its own
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal the loop to stop between steps and wait for it, returning steps taken
    pub fn stop(self) -> Result<usize> {
        self.stop.store(true, Ordering::Release);
        self.join()
    }

    /// Wait for the loop to finish on its own
    pub fn join(self) -> Result<usize> {
        self.handle
            .join()
            .map_err(|_| anyhow!("runner thread panicked"))?
    }
}
