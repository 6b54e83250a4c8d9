use std::env;
use std::error::Error;

use chrono::Utc;
use dotenv::dotenv;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, span, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::constant::{HISTORY_CSV_PREFIX, PROGRESS_INTERVAL};
use crate::domain::types::{FlowFormula, RunConfig};
use crate::error::LoadError;
use crate::fixtures::example_network::run_config_for;
use crate::fixtures::loader::{load_network_or_example, load_run_config};
use crate::report::{print_network_summary, print_results, save_to_csv};
use crate::solver::aco::monitor::ProgressLogMonitor;
use crate::solver::aco::search::AcoSearch;

/// Initialize tracing and environment
fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();

    dotenv().ok();
    Ok(())
}

/// `SEED` from the environment, otherwise the wall clock.
fn resolve_seed() -> u64 {
    if let Ok(raw) = env::var("SEED") {
        match raw.trim().parse::<u64>() {
            Ok(seed) => {
                info!("Using SEED {} from the environment", seed);
                return seed;
            }
            Err(err) => warn!("Ignoring SEED={:?}: {}", raw, err),
        }
    }

    let now = Utc::now();
    let seed = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp()) as u64;
    info!("Seeded from the clock: {}", seed);
    seed
}

pub fn history_csv_name(formula: FlowFormula) -> String {
    format!("{}_{}.csv", HISTORY_CSV_PREFIX, formula.slug())
}

/// The runs to perform: the single run described by `run_config_file`, or
/// one default run per formula over the network from `network_file`.
pub fn planned_runs(
    run_config_file: Option<&str>,
    network_file: Option<&str>,
) -> Result<Vec<RunConfig>, LoadError> {
    if let Some(path) = run_config_file {
        let config = load_run_config(path)?;
        info!("Loaded {} run configuration from {}", config.formula, path);
        return Ok(vec![config]);
    }

    let network = load_network_or_example(network_file);
    Ok(FlowFormula::ALL
        .into_iter()
        .map(|formula| run_config_for(network.clone(), formula))
        .collect())
}

/// Estimate the roughness of every pipe, once per planned run.
pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;

    let seed = resolve_seed();
    let run_config_file = env::var("RUN_CONFIG").ok();
    let network_file = env::var("NETWORK_FILE").ok();
    let runs = planned_runs(run_config_file.as_deref(), network_file.as_deref())?;

    for (offset, config) in runs.into_iter().enumerate() {
        let formula = config.formula;
        if offset == 0 {
            print_network_summary(&config.network);
        }
        let rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(offset as u64));

        let search = {
            let span = span!(Level::INFO, "formula", formula = %formula);
            let _guard = span.enter();
            info!(
                "Starting {} estimation: {} candidates, {} generations",
                formula, config.aco.population_size, config.aco.max_generations
            );
            AcoSearch::new(config, rng)?
        };

        let mut monitor = ProgressLogMonitor::new(PROGRESS_INTERVAL);
        let result = search.run(&mut monitor);

        print_results(formula, &result);
        save_to_csv(&result.history, history_csv_name(formula))?;
    }

    Ok(())
}
