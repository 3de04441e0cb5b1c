//! Information-driven bar construction for the finlabel pipeline.
//!
//! This crate handles:
//! - Tick / volume / dollar bar sampling via threshold accumulation
//! - OHLC derivation from the raw reference series

pub mod aggregator;
pub mod ohlc;

pub use aggregator::{aggregate, bar_indices, ThresholdAccumulator};
pub use ohlc::ohlc_bars;
