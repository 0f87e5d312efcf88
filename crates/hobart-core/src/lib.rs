#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod allocation;
pub mod asset;
pub mod factors;
pub mod labels;
pub mod result;
pub mod security;
pub mod stats;

pub use allocation::Allocation;
pub use asset::AssetClass;
pub use factors::AdditionalFactors;
pub use labels::{EconomicCycle, MarketRegime, MarketSentiment, NEUTRAL_SCORE};
pub use result::ModelResult;
pub use security::{IndustryScore, RankedSecurity, SecurityFactors};
