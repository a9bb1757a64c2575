//! Comparison-counting search over a [`ChainedIndex`].
//!
//! Two cost models are supported:
//!
//! - [`SearchProtocol::Direct`]: one comparison to test presence, plus one per
//!   chain element traversed when the key is present.
//! - [`SearchProtocol::LinearScan`]: entries are walked in enumeration order
//!   and each entry's chain is compared to the target chain. The cost is the
//!   1-based position of the match, or the entry count when nothing matches.

use std::fmt;

use tracing::trace;

use crate::index::ChainedIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchProtocol {
    Direct,
    #[default]
    LinearScan,
}

impl SearchProtocol {
    /// Comparisons needed to find `key` in `index`.
    pub fn comparisons<V>(self, index: &ChainedIndex<V>, key: &str) -> u64 {
        match self {
            Self::Direct => direct_comparisons(index, key),
            Self::LinearScan => linear_scan_comparisons(index, key),
        }
    }
}

impl fmt::Display for SearchProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::LinearScan => f.write_str("linear-scan"),
        }
    }
}

pub fn direct_comparisons<V>(index: &ChainedIndex<V>, key: &str) -> u64 {
    // An absent key yields an empty chain.
    1 + index.lookup(key).len() as u64
}

pub fn linear_scan_comparisons<V>(index: &ChainedIndex<V>, key: &str) -> u64 {
    let target = index.position(key);
    let mut comparisons = 0u64;
    for pos in 0..index.distinct_key_count() {
        comparisons += 1;
        if Some(pos) == target {
            return comparisons;
        }
    }
    comparisons
}

/// Running totals for a batch of searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchReport {
    pub records_searched: u64,
    pub total_comparisons: u64,
}

impl SearchReport {
    #[inline]
    pub fn record(&mut self, comparisons: u64) {
        self.records_searched += 1;
        self.total_comparisons += comparisons;
    }

    /// Mean comparisons per search; `0.0` when nothing was searched.
    pub fn average(&self) -> f64 {
        if self.records_searched == 0 {
            return 0.0;
        }
        self.total_comparisons as f64 / self.records_searched as f64
    }

    /// [`average`](Self::average) rounded to two decimal places.
    pub fn rounded_average(&self) -> f64 {
        round_to_hundredths(self.average())
    }
}

impl FromIterator<u64> for SearchReport {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut report = Self::default();
        for comparisons in iter {
            report.record(comparisons);
        }
        report
    }
}

#[inline]
pub fn round_to_hundredths(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Search `index` once per key and total the comparisons.
pub fn search_all<'k, V>(
    index: &ChainedIndex<V>,
    protocol: SearchProtocol,
    keys: impl IntoIterator<Item = &'k str>,
) -> SearchReport {
    keys.into_iter()
        .map(|key| {
            let comparisons = protocol.comparisons(index, key);
            trace!(key, comparisons, "Searched key");
            comparisons
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_index() -> ChainedIndex<u64> {
        let mut idx = ChainedIndex::new();
        for (i, key) in ["Smith", "Jones", "Smith", "Lee", "Jones"].iter().enumerate() {
            idx.insert(key, i as u64);
        }
        idx
    }

    #[test]
    fn test_direct_present_and_absent() {
        let idx = names_index();
        assert_eq!(direct_comparisons(&idx, "Smith"), 3);
        assert_eq!(direct_comparisons(&idx, "Lee"), 2);
        assert_eq!(direct_comparisons(&idx, "Brown"), 1);
    }

    #[test]
    fn test_linear_scan_positions() {
        let idx = names_index();
        assert_eq!(linear_scan_comparisons(&idx, "Smith"), 1);
        assert_eq!(linear_scan_comparisons(&idx, "Jones"), 2);
        assert_eq!(linear_scan_comparisons(&idx, "Lee"), 3);
        assert_eq!(linear_scan_comparisons(&idx, "Brown"), 3);
    }

    #[test]
    fn test_linear_scan_empty_index() {
        let idx: ChainedIndex<u64> = ChainedIndex::new();
        assert_eq!(linear_scan_comparisons(&idx, "Smith"), 0);
        assert_eq!(direct_comparisons(&idx, "Smith"), 1);
    }

    #[test]
    fn test_average() {
        let report: SearchReport = [2, 3, 3, 4].into_iter().collect();
        assert_eq!(report.average(), 3.0);
        assert_eq!(report.rounded_average(), 3.0);

        let report: SearchReport = [1, 2, 4].into_iter().collect();
        assert_eq!(report.rounded_average(), 2.33);
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        let report = SearchReport::default();
        assert_eq!(report.average(), 0.0);
    }

    #[test]
    fn test_search_all_direct_scenario() {
        let idx = names_index();
        let keys = ["Smith", "Jones", "Smith", "Lee", "Jones"];
        let report = search_all(&idx, SearchProtocol::Direct, keys);
        assert_eq!(report.records_searched, 5);
        assert_eq!(report.total_comparisons, 14);
        assert_eq!(report.rounded_average(), 2.8);
    }

    #[test]
    fn test_search_all_linear_scan_scenario() {
        let idx = names_index();
        let keys = ["Smith", "Jones", "Smith", "Lee", "Jones"];
        let report = search_all(&idx, SearchProtocol::LinearScan, keys);
        // 1 + 2 + 1 + 3 + 2
        assert_eq!(report.total_comparisons, 9);
        assert_eq!(report.rounded_average(), 1.8);
    }

    #[test]
    fn test_protocol_display() {
        assert_eq!(SearchProtocol::Direct.to_string(), "direct");
        assert_eq!(SearchProtocol::LinearScan.to_string(), "linear-scan");
        assert_eq!(SearchProtocol::default(), SearchProtocol::LinearScan);
    }
}
