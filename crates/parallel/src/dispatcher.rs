//! Molecule dispatch over a fixed-size worker pool.
//!
//! Each molecule is an immutable contiguous index range; workers return
//! self-contained partial results with their own time keys. A worker count
//! of 1 bypasses the pool entirely for bit-for-bit reproducible sequential
//! execution. Any molecule error aborts the whole dispatch: a partial
//! label set must never be returned silently.

use crate::partition::{lin_parts, molecules, nested_parts};
use finlabel_core::{Error, Result};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::info;

/// Dispatches molecule-sized units of work to a worker pool.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    workers: usize,
    linear: bool,
}

impl Dispatcher {
    /// Create a dispatcher with the given worker count.
    ///
    /// `linear` selects equal-sized molecules; otherwise the nested
    /// (load-balanced) partition is used.
    pub fn new(workers: usize, linear: bool) -> Self {
        Self {
            workers: workers.max(1),
            linear,
        }
    }

    /// Single-worker dispatcher: strictly sequential, deterministic.
    pub fn sequential() -> Self {
        Self::new(1, true)
    }

    /// Worker count.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Partition `num_atoms` and run `func` once per molecule.
    ///
    /// Partial results are concatenated and re-sorted by `key`, so the
    /// final order is deterministic and independent of completion order.
    pub fn run<T, K, F, S>(&self, num_atoms: usize, func: F, key: S) -> Result<Vec<T>>
    where
        T: Send,
        K: Ord,
        F: Fn(Range<usize>) -> Result<Vec<T>> + Sync,
        S: Fn(&T) -> K,
    {
        let parts = if self.linear {
            lin_parts(num_atoms, self.workers)
        } else {
            nested_parts(num_atoms, self.workers, false)
        };
        let mols = molecules(&parts);
        let total = mols.len();
        let start = Instant::now();

        let mut out: Vec<T> = if self.workers == 1 {
            let mut out = Vec::new();
            for (done, molecule) in mols.into_iter().enumerate() {
                out.extend(func(molecule)?);
                report_progress(done + 1, total, start);
            }
            out
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .map_err(|e| Error::worker(e.to_string()))?;

            let completed = AtomicUsize::new(0);
            let partials: Vec<Vec<T>> = pool.install(|| {
                mols.into_par_iter()
                    .map(|molecule| {
                        let partial = func(molecule)?;
                        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        report_progress(done, total, start);
                        Ok(partial)
                    })
                    .collect::<Result<Vec<Vec<T>>>>()
            })?;
            partials.into_iter().flatten().collect()
        };

        out.sort_by(|a, b| key(a).cmp(&key(b)));
        Ok(out)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::sequential()
    }
}

/// Log progress after a molecule completes: fraction done, elapsed time
/// and estimated remaining time. Purely observational.
fn report_progress(done: usize, total: usize, start: Instant) {
    let frac = done as f64 / total as f64;
    let elapsed_min = start.elapsed().as_secs_f64() / 60.0;
    let remaining_min = elapsed_min * (1.0 / frac - 1.0);
    info!(
        done,
        total,
        pct = frac * 100.0,
        elapsed_min,
        remaining_min,
        "molecule completed"
    );
}
