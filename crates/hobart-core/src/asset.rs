//! Asset class definitions for macro-level allocations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four asset-class buckets of a macro allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// Equities.
    Stock,
    /// Fixed income.
    Bond,
    /// Commodities.
    Commodity,
    /// Cash and cash equivalents.
    Cash,
}

impl AssetClass {
    /// Returns all asset classes in template order.
    pub const fn all() -> [Self; 4] {
        [Self::Stock, Self::Bond, Self::Commodity, Self::Cash]
    }

    /// Returns the wire label used as the allocation key.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Stock => "STOCK",
            Self::Bond => "BOND",
            Self::Commodity => "COMMODITY",
            Self::Cash => "CASH",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
