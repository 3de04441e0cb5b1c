//! Work partitioning and parallel dispatch for the finlabel pipeline.
//!
//! This crate handles:
//! - Linear and load-balanced ("nested") atom partitioning
//! - Molecule dispatch over a fixed-size worker pool with deterministic
//!   merged output and progress reporting

pub mod dispatcher;
pub mod partition;

pub use dispatcher::Dispatcher;
pub use partition::{lin_parts, molecules, nested_parts};
