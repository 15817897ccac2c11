//! Measure Log Example
//!
//! Scans one simulation log with the measures of an experiment file and
//! writes the reports to its sinks, without going through the CLI.
//!
//! Run with: cargo run -p demos --bin measure_log -- demos/experiment.toml demos/run.log

use std::path::Path;

use config_loader::ConfigLoader;
use measures::{LogScanner, MeasureRegistry, MeasureSet};
use reporter::create_reporter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let config = args.next().unwrap_or_else(|| "demos/experiment.toml".to_string());
    let log = args.next().unwrap_or_else(|| "demos/run.log".to_string());

    // ==== Stage 1: Load experiment ====
    tracing::info!(path = %config, "Loading experiment");
    let blueprint = ConfigLoader::load_from_path(Path::new(&config))?;

    // ==== Stage 2: Build measures ====
    let mut measures = MeasureSet::from_blueprint(&blueprint, &MeasureRegistry::builtin())?;
    tracing::info!(measures = measures.len(), "Measures ready");

    // ==== Stage 3: Scan ====
    let stats = LogScanner::strict(blueprint.simulation.strict)
        .scan_file(Path::new(&log), &mut measures)
        .await?;
    eprintln!("{stats}");

    // ==== Stage 4: Report ====
    let reporter = create_reporter(&blueprint.sinks)?;
    reporter.dispatch(&measures.reports()).await;
    for (sink, delivered) in reporter.shutdown().await {
        tracing::info!(
            sink = %sink,
            written = delivered.written,
            failed = delivered.failed,
            "Sink finished"
        );
    }

    Ok(())
}
