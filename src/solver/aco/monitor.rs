use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::domain::types::Fitness;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSnapshot {
    pub generation: usize,
    /// Global best after this generation was evaluated.
    pub best_fitness: Fitness,
    pub improved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    Continue,
    Terminate(String),
}

/// Observes a search between generations and may stop it.
pub trait SearchMonitor {
    fn name(&self) -> &str;
    fn on_generation(&mut self, snapshot: &GenerationSnapshot);
    fn search_command(&self) -> SearchCommand;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl SearchMonitor for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    fn on_generation(&mut self, _snapshot: &GenerationSnapshot) {}

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

/// Stops the search once the shared flag is raised.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a> {
    stop_flag: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self { stop_flag }
    }
}

impl SearchMonitor for InterruptMonitor<'_> {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_generation(&mut self, _snapshot: &GenerationSnapshot) {}

    fn search_command(&self) -> SearchCommand {
        if self.stop_flag.load(Ordering::Relaxed) {
            SearchCommand::Terminate("Interrupt signal received".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

/// Logs the global best every `interval` generations.
#[derive(Debug, Clone)]
pub struct ProgressLogMonitor {
    interval: usize,
}

impl ProgressLogMonitor {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl SearchMonitor for ProgressLogMonitor {
    fn name(&self) -> &str {
        "ProgressLogMonitor"
    }

    fn on_generation(&mut self, snapshot: &GenerationSnapshot) {
        if snapshot.generation % self.interval == 0 {
            info!(
                "Generation {:4} | Best Fitness: {}",
                snapshot.generation, snapshot.best_fitness
            );
        }
    }

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
