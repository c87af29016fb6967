/*!
 * Process Simulator - Main Entry Point
 *
 * Spawns a batch of compute-bound and blocking processes and drives them
 * through a CPU queue and a blocking queue until every one has finished.
 */

use miette::IntoDiagnostic;
use tracing::info;

use process_sim::{init_tracing, scheduler, SimConfig};

fn main() -> miette::Result<()> {
    init_tracing();

    let config = SimConfig::from_env()?;
    info!(
        process_count = config.process_count,
        quantum = config.quantum,
        seed = ?config.seed,
        "configuration loaded"
    );

    let report = scheduler::run(&config)?;

    let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
    println!("{}", json);

    Ok(())
}
