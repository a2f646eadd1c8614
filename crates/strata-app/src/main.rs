//! `strata`: runs the biome shifter headlessly for a fixed number of ticks.
//!
//! Run with: `cargo run -p strata-app -- --ticks 500 --seed 7`

use std::process::ExitCode;

use clap::Parser;
use strata_app::{AppError, Simulation};
use strata_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config_dir();
    let loaded = config_dir
        .as_ref()
        .map_err(|err| err.to_string())
        .and_then(|dir| Config::load_or_create(dir).map_err(|err| err.to_string()));
    let (mut config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.as_deref().ok();
    strata_log::init_logging(log_dir, config.debug.log_to_file, Some(&config));

    if let Some(err) = load_error {
        error!("{err}; continuing with default settings");
    }

    match run(config, args.ticks) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config, ticks: u32) -> Result<(), AppError> {
    let mut sim = Simulation::new(config)?;
    let stats = sim.run_ticks(ticks);

    info!(
        ticks = stats.ticks,
        discoveries = stats.discoveries,
        failed_searches = stats.failed_searches,
        blocks_written = stats.blocks_written,
        retired = stats.columns_retired,
        evicted = stats.columns_evicted,
        tracked = sim.tracked(),
        "run finished"
    );
    for (biome, count) in sim.biome_histogram() {
        info!("{biome:>10}: {count}");
    }
    Ok(())
}
