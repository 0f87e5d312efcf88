#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobart-quant/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod macro_timing;
pub mod multi_factor;
pub mod sector_rotation;

pub use macro_timing::{MacroTimingConfig, MacroTimingModel};
pub use multi_factor::{FactorRanking, MultiFactorConfig, MultiFactorModel};
pub use sector_rotation::{SectorRotationConfig, SectorRotationModel};

use thiserror::Error;

/// Errors that can occur when constructing a model from a configuration.
///
/// The scoring operations themselves never fail: invalid labels fall back
/// to neutral scores and empty inputs produce empty, zero-confidence
/// results.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A configuration field is out of its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Scoring weights do not form a distribution.
    #[error("Scoring weights must sum to 1.0, got {0}")]
    UnnormalizedWeights(f64),
}
