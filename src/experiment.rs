//! One experiment: build an index under a key strategy, then replay every
//! inserted record as a search.

use std::rc::Rc;

use serde::Serialize;
use tracing::info;

use crate::index::{ChainedIndex, IndexConfig, IndexStats};
use crate::record::SaleRecord;
use crate::search::{search_all, SearchProtocol, SearchReport};
use crate::strategy::KeyStrategy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentConfig {
    pub strategy: KeyStrategy,
    pub protocol: SearchProtocol,
    /// The hash function is taken from `strategy`, not from this field.
    pub index: IndexConfig,
}

impl ExperimentConfig {
    pub fn new(strategy: KeyStrategy, protocol: SearchProtocol) -> Self {
        Self {
            strategy,
            protocol,
            index: IndexConfig::default(),
        }
    }

    pub fn with_index(mut self, index: IndexConfig) -> Self {
        self.index = index;
        self
    }
}

/// State owned by a single experiment run.
///
/// Each run gets a fresh context; nothing is shared between runs.
pub struct ExperimentContext {
    strategy: KeyStrategy,
    protocol: SearchProtocol,
    index: ChainedIndex<Rc<SaleRecord>>,
    records: Vec<Rc<SaleRecord>>,
}

impl ExperimentContext {
    pub fn new(config: ExperimentConfig) -> Self {
        let index_config = config.index.with_hash_function(config.strategy.hash_function());
        Self {
            strategy: config.strategy,
            protocol: config.protocol,
            index: ChainedIndex::with_config(index_config),
            records: Vec::new(),
        }
    }

    #[inline]
    pub fn strategy(&self) -> KeyStrategy {
        self.strategy
    }

    #[inline]
    pub fn protocol(&self) -> SearchProtocol {
        self.protocol
    }

    #[inline]
    pub fn index(&self) -> &ChainedIndex<Rc<SaleRecord>> {
        &self.index
    }

    /// Every inserted record, in insertion order.
    #[inline]
    pub fn records(&self) -> &[Rc<SaleRecord>] {
        &self.records
    }

    pub fn insert(&mut self, record: SaleRecord) {
        let record = Rc::new(record);
        self.index.insert(self.strategy.key(&record), Rc::clone(&record));
        self.records.push(record);
    }

    /// Chain for `key` under this context's strategy.
    pub fn lookup(&self, key: &str) -> &[Rc<SaleRecord>] {
        self.index.lookup(key)
    }

    /// Search once for each inserted record's key.
    pub fn search_all(&self) -> SearchReport {
        let strategy = self.strategy;
        search_all(
            &self.index,
            self.protocol,
            self.records.iter().map(|r| strategy.key(r)),
        )
    }

    pub fn finish(&self) -> ExperimentOutcome {
        let report = self.search_all();
        let outcome = ExperimentOutcome {
            experiment: self.strategy.experiment_number(),
            strategy: self.strategy.description(),
            protocol: self.protocol.to_string(),
            records: self.records.len(),
            average_comparisons: report.rounded_average(),
            total_comparisons: report.total_comparisons,
            index: self.index.stats(),
        };
        info!(
            experiment = outcome.experiment,
            protocol = %self.protocol,
            records = outcome.records,
            distinct_keys = outcome.index.distinct_keys,
            capacity = outcome.index.capacity,
            resizes = outcome.index.resizes,
            average_comparisons = outcome.average_comparisons,
            "Experiment finished"
        );
        outcome
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentOutcome {
    pub experiment: u8,
    pub strategy: &'static str,
    pub protocol: String,
    pub records: usize,
    /// Rounded to two decimal places.
    pub average_comparisons: f64,
    pub total_comparisons: u64,
    pub index: IndexStats,
}

/// Build a fresh context from `records` and report on it.
pub fn run_experiment(
    config: ExperimentConfig,
    records: impl IntoIterator<Item = SaleRecord>,
) -> ExperimentOutcome {
    let mut ctx = ExperimentContext::new(config);
    for record in records {
        ctx.insert(record);
    }
    ctx.finish()
}
