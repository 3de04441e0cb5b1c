//! Core types and configuration for the finlabel pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Market data and labeling types (ticks, events, barrier touches, labels)
//! - A lean time-indexed series container
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod series;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use series::TimeSeries;
pub use types::*;
