//! Partitioning of independent atoms into contiguous molecules.
//!
//! Returned boundaries always start at 0, end at `num_atoms` and are
//! strictly increasing, so molecules cover every atom exactly once.

/// Equal-sized partition: `ceil(linspace(0, num_atoms, parts + 1))`.
///
/// Boundaries are computed in exact integer arithmetic; a float linspace
/// can round the last boundary past `num_atoms`.
pub fn lin_parts(num_atoms: usize, num_workers: usize) -> Vec<usize> {
    if num_atoms == 0 {
        return vec![0];
    }
    let parts = num_workers.max(1).min(num_atoms);
    (0..=parts)
        .map(|i| (i * num_atoms).div_ceil(parts))
        .collect()
}

/// Load-balanced partition for triangular per-atom cost.
///
/// Each boundary is the positive root of
/// `p'^2 + p' - (p^2 + p + N(N+1)/W) = 0`, producing molecules whose
/// *total* triangular cost is equal, so molecule sizes shrink as atom
/// positions grow heavier. `upper_triangular` inverts the size ordering
/// for workloads where the first atoms are the heaviest.
pub fn nested_parts(num_atoms: usize, num_workers: usize, upper_triangular: bool) -> Vec<usize> {
    if num_atoms == 0 {
        return vec![0];
    }
    let workers = num_workers.max(1).min(num_atoms);
    let n = num_atoms as f64;

    let mut raw = vec![0.0f64];
    for _ in 0..workers {
        let prev: f64 = raw[raw.len() - 1];
        let discriminant = 1.0 + 4.0 * (prev * prev + prev + n * (n + 1.0) / workers as f64);
        raw.push((-1.0 + discriminant.sqrt()) / 2.0);
    }

    let mut parts: Vec<usize> = raw.iter().map(|p| p.round() as usize).collect();
    if let Some(last) = parts.last_mut() {
        *last = num_atoms;
    }

    if upper_triangular {
        // Reverse the molecule sizes so the heaviest (first) atoms get
        // the smallest molecules.
        let sizes: Vec<usize> = parts.windows(2).rev().map(|w| w[1] - w[0]).collect();
        let mut reversed = vec![0usize];
        for size in sizes {
            reversed.push(reversed[reversed.len() - 1] + size);
        }
        parts = reversed;
    }

    // Rounding can collide adjacent boundaries for tiny inputs; collapse
    // the empty molecules.
    parts.dedup();
    parts
}

/// Boundaries as contiguous index ranges.
pub fn molecules(parts: &[usize]) -> Vec<std::ops::Range<usize>> {
    parts.windows(2).map(|w| w[0]..w[1]).collect()
}
