//! CLI argument definitions for the experiment driver.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sales_index::index::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
use sales_index::{KeyStrategy, SearchProtocol};

/// Build a chained index over sale records and report average search cost.
///
/// Experiments:
///   1  customer last name
///   2  salesperson last name
///   3  customer full name, ordinal-sum hash
///   4  salesperson last name, ordinal-sum hash
///
/// ## Examples
///
/// Run all four experiments:
///   sales-index car_sales.csv
///
/// Salesperson experiments only, direct cost model:
///   sales-index car_sales.csv -e 2 -e 4 -p direct
#[derive(Parser, Debug)]
#[command(name = "sales-index", version, about, long_about = None)]
pub struct Cli {
    /// CSV file of sale records
    pub file: PathBuf,

    /// Experiment to run (repeatable; default: all)
    #[arg(short = 'e', long = "experiment", value_parser = clap::value_parser!(u8).range(1..=4))]
    pub experiments: Vec<u8>,

    /// Search cost model
    #[arg(short = 'p', long, value_enum, default_value = "linear-scan")]
    pub protocol: ProtocolArg,

    /// Starting table size hint
    #[arg(long, default_value_t = DEFAULT_CAPACITY, value_parser = parse_positive_usize)]
    pub capacity: usize,

    /// Resize when records per key exceeds this
    #[arg(long, default_value_t = DEFAULT_LOAD_FACTOR, value_parser = parse_load_factor)]
    pub load_factor: f64,

    /// Treat the first line as data rather than a header
    #[arg(long)]
    pub no_header: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    // === Logging Options ===
    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Cli {
    /// Selected strategies in the order given, or all four.
    pub fn strategies(&self) -> Vec<KeyStrategy> {
        if self.experiments.is_empty() {
            return KeyStrategy::ALL.to_vec();
        }
        self.experiments
            .iter()
            .filter_map(|&n| KeyStrategy::from_experiment(n))
            .collect()
    }
}

/// Search protocol argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProtocolArg {
    /// 1 comparison for a miss, 1 + chain length for a hit
    Direct,
    /// Position of the key's entry in enumeration order
    LinearScan,
}

impl From<ProtocolArg> for SearchProtocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Direct => SearchProtocol::Direct,
            ProtocolArg::LinearScan => SearchProtocol::LinearScan,
        }
    }
}

/// Report format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per experiment
    Jsonl,
}

/// Log level argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level (default)
    Warn,
    /// Error level (least verbose)
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Parse a positive usize (>= 1).
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value < 1 {
        return Err(format!("{} is not in 1..", value));
    }
    Ok(value)
}

/// Parse a finite, positive load factor.
fn parse_load_factor(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} must be a positive number", value));
    }
    Ok(value)
}
