//! # sales-index
//!
//! A separate-chaining index over sale records, plus comparison-counting
//! searches used to benchmark how well a key choice spreads records.
//!
//! Records are indexed under a key picked by a [`KeyStrategy`] (customer or
//! salesperson last name, full customer name). Each distinct key owns one
//! chain; the index resizes whenever `records / keys` exceeds the load-factor
//! threshold. Every inserted record is then searched for again and the
//! comparisons are averaged.
//!
//! ## Example
//!
//! ```rust
//! use sales_index::{ChainedIndex, SearchProtocol};
//!
//! let mut index: ChainedIndex<u32> = ChainedIndex::new();
//! index.insert("Smith", 1);
//! index.insert("Jones", 2);
//! index.insert("Smith", 3);
//!
//! assert_eq!(index.lookup("Smith"), &[1, 3]);
//! assert_eq!(index.distinct_key_count(), 2);
//!
//! // One presence check plus two chain elements.
//! assert_eq!(SearchProtocol::Direct.comparisons(&index, "Smith"), 3);
//! ```

pub mod error;
pub mod experiment;
pub mod hash;
pub mod index;
pub mod record;
pub mod search;
pub mod source;
pub mod strategy;

pub use error::{Result, SourceError};
pub use experiment::{run_experiment, ExperimentConfig, ExperimentContext, ExperimentOutcome};
pub use hash::HashFunction;
pub use index::{ChainedIndex, IndexConfig, IndexStats};
pub use record::SaleRecord;
pub use search::{SearchProtocol, SearchReport};
pub use source::RecordSource;
pub use strategy::KeyStrategy;

#[cfg(test)]
mod proptests;
