//! Key-selection strategies: which record field becomes the index key, and
//! which hash places it.

use std::fmt;

use crate::hash::HashFunction;
use crate::record::SaleRecord;

/// The four reference experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyStrategy {
    /// Customer last name, general-purpose hash.
    CustomerLastName,
    /// Salesperson last name, general-purpose hash.
    SalespersonLastName,
    /// Full customer name, hashed by the ordinal sum of its last name.
    CustomerFullName,
    /// Salesperson last name, ordinal-sum hash.
    SalespersonLastNameOrdinal,
}

impl KeyStrategy {
    pub const ALL: [KeyStrategy; 4] = [
        Self::CustomerLastName,
        Self::SalespersonLastName,
        Self::CustomerFullName,
        Self::SalespersonLastNameOrdinal,
    ];

    /// Strategy for experiment number `n` (1-based).
    pub fn from_experiment(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::CustomerLastName),
            2 => Some(Self::SalespersonLastName),
            3 => Some(Self::CustomerFullName),
            4 => Some(Self::SalespersonLastNameOrdinal),
            _ => None,
        }
    }

    pub fn experiment_number(self) -> u8 {
        match self {
            Self::CustomerLastName => 1,
            Self::SalespersonLastName => 2,
            Self::CustomerFullName => 3,
            Self::SalespersonLastNameOrdinal => 4,
        }
    }

    /// Index key for `record`. Used for both insertion and search.
    #[inline]
    pub fn key<'r>(self, record: &'r SaleRecord) -> &'r str {
        match self {
            Self::CustomerLastName => record.customer_last_name(),
            Self::SalespersonLastName | Self::SalespersonLastNameOrdinal => {
                record.salesperson_last_name()
            }
            Self::CustomerFullName => record.customer_name(),
        }
    }

    pub fn hash_function(self) -> HashFunction {
        match self {
            Self::CustomerLastName | Self::SalespersonLastName => HashFunction::General,
            Self::CustomerFullName | Self::SalespersonLastNameOrdinal => {
                HashFunction::LastNameOrdinalSum
            }
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::CustomerLastName => "customer last name",
            Self::SalespersonLastName => "salesperson last name",
            Self::CustomerFullName => "customer full name, ordinal-sum hash",
            Self::SalespersonLastNameOrdinal => "salesperson last name, ordinal-sum hash",
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
