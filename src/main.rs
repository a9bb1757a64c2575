//! sales-index CLI
//!
//! Runs the indexing experiments over a CSV of sale records.

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use sales_index::{
    ExperimentConfig, ExperimentContext, ExperimentOutcome, IndexConfig, RecordSource,
};
use tracing::{info, Level};
use tracing_subscriber::fmt;

mod args;

use args::{Cli, LogLevel, OutputFormat};

/// Initialize logging.
fn init_logging(level: LogLevel) -> Result<()> {
    let level: Level = level.into();

    let subscriber = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr); // Log to stderr so stdout is clean for output

    subscriber.init();

    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_logging(args.log_level)?;

    let index = IndexConfig {
        initial_capacity: args.capacity,
        load_factor_threshold: args.load_factor,
        ..IndexConfig::default()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for strategy in args.strategies() {
        let config = ExperimentConfig::new(strategy, args.protocol.into()).with_index(index);

        // Reading and inserting are timed together, as one build phase.
        let started = Instant::now();
        let mut ctx = ExperimentContext::new(config);
        let source = RecordSource::open_with_header(&args.file, !args.no_header)
            .with_context(|| format!("Failed to open {}", args.file.display()))?;
        for record in source {
            let record =
                record.with_context(|| format!("Failed to read {}", args.file.display()))?;
            ctx.insert(record);
        }
        let build_secs = started.elapsed().as_secs_f64();
        info!(experiment = strategy.experiment_number(), build_secs, "Index built");

        let outcome = ctx.finish();
        match args.format {
            OutputFormat::Text => write_text(&mut out, &outcome, build_secs)?,
            OutputFormat::Jsonl => write_jsonl(&mut out, &outcome, build_secs)?,
        }
    }

    out.flush()?;
    Ok(())
}

fn write_text(out: &mut impl Write, outcome: &ExperimentOutcome, build_secs: f64) -> Result<()> {
    writeln!(out, "Experiment: {} ({})", outcome.experiment, outcome.strategy)?;
    writeln!(out, "{:.3} seconds taken to build the index", build_secs)?;
    writeln!(
        out,
        "Average number of comparisons: {:.2} - table size {}",
        outcome.average_comparisons, outcome.index.distinct_keys
    )?;
    Ok(())
}

fn write_jsonl(out: &mut impl Write, outcome: &ExperimentOutcome, build_secs: f64) -> Result<()> {
    let mut value = serde_json::to_value(outcome)?;
    value["build_secs"] = serde_json::json!(build_secs);
    serde_json::to_writer(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}
