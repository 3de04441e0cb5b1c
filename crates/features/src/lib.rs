//! Event-selection features for the finlabel pipeline.
//!
//! This crate handles:
//! - Daily volatility via exponentially weighted moving std
//! - Symmetric CUSUM event filtering

pub mod cusum;
pub mod volatility;

pub use cusum::{cusum_filter, CusumFilter, CusumThreshold};
pub use volatility::{daily_volatility, EwmStd};
