//! Triple-barrier labeling for the finlabel pipeline.
//!
//! This crate handles:
//! - Vertical (time) barrier derivation
//! - Barrier touch search over future price paths
//! - Event assembly with target/side alignment, parallelized per molecule
//! - Plain and meta label construction

pub mod barriers;
pub mod bins;
pub mod events;
pub mod vertical;

pub use barriers::apply_barriers;
pub use bins::{label_events, label_events_meta};
pub use events::{build_events, build_events_meta};
pub use vertical::vertical_barriers;
