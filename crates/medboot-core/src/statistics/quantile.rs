//! Empirical quantiles of a replicate distribution.
//!
//! Uses Hyndman & Fan (1996) type 7 quantiles (linear interpolation between
//! order statistics), the convention of most statistics packages for
//! percentile bootstrap intervals:
//!
//! ```text
//! h = (n - 1) * p
//! q = x[floor(h)] + (h - floor(h)) * (x[ceil(h)] - x[floor(h)])
//! ```
//!
//! Order statistics are placed with `select_nth_unstable_by` (O(n) expected)
//! using `total_cmp`, so NaN replicates sort to the ends instead of
//! panicking.
//!
//! # Reference
//!
//! Hyndman, R. J. & Fan, Y. (1996). "Sample quantiles in statistical packages."
//! The American Statistician 50(4):361–365.

/// Zero-based order statistic indices and interpolation weight for
/// probability `p` in a sample of size `n`.
#[inline]
fn type7_position(n: usize, p: f64) -> (usize, usize, f64) {
    debug_assert!(n > 0, "n must be positive");
    let h = (n - 1) as f64 * p;
    let lo = (h.floor() as usize).min(n - 1);
    let hi = (h.ceil() as usize).min(n - 1);
    (lo, hi, h - lo as f64)
}

/// Interpolate between two order statistics, clamped to the segment so the
/// result is monotone in `p` even under rounding.
#[inline]
fn interpolate(lo_val: f64, hi_val: f64, frac: f64) -> f64 {
    if frac == 0.0 || lo_val == hi_val {
        return lo_val;
    }
    let q = lo_val + frac * (hi_val - lo_val);
    if q.is_nan() {
        q
    } else {
        q.clamp(lo_val, hi_val)
    }
}

/// Compute a single type 7 quantile from a mutable slice.
///
/// The slice is partially reordered as a side effect.
///
/// # Panics
///
/// Panics if `data` is empty or if `p` is outside [0, 1].
pub fn compute_quantile(data: &mut [f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );

    let n = data.len();
    if n == 1 {
        return data[0];
    }

    let (lo, hi, frac) = type7_position(n, p);
    let cmp = |a: &f64, b: &f64| a.total_cmp(b);

    if lo == hi {
        let (_, mid, _) = data.select_nth_unstable_by(lo, cmp);
        return *mid;
    }

    // Larger index first, then the smaller one within the left partition.
    let (_, mid, _) = data.select_nth_unstable_by(hi, cmp);
    let hi_val = *mid;
    let (_, mid, _) = data[..hi].select_nth_unstable_by(lo, cmp);
    let lo_val = *mid;

    interpolate(lo_val, hi_val, frac)
}

/// Compute several type 7 quantiles at once.
///
/// `probs` must be sorted ascending. Clones `data` once and places every
/// needed order statistic with one multi-select pass.
pub fn compute_quantiles(data: &[f64], probs: &[f64]) -> Vec<f64> {
    assert!(!data.is_empty(), "Cannot compute quantiles of empty slice");
    debug_assert!(probs.windows(2).all(|w| w[0] <= w[1]), "probs must be sorted");

    let n = data.len();
    let positions: Vec<(usize, usize, f64)> = probs
        .iter()
        .map(|&p| {
            assert!((0.0..=1.0).contains(&p), "Quantile probability must be in [0, 1]");
            type7_position(n, p)
        })
        .collect();

    let mut indices: Vec<usize> = positions.iter().flat_map(|&(lo, hi, _)| [lo, hi]).collect();
    indices.sort_unstable();
    indices.dedup();

    let mut work = data.to_vec();
    multi_select(&mut work, &indices);

    positions
        .into_iter()
        .map(|(lo, hi, frac)| interpolate(work[lo], work[hi], frac))
        .collect()
}

/// Equal-tailed percentile interval `[α/2, 1 − α/2]` with `α = 1 − ci_level`.
///
/// Returns `(lower, upper)` with `lower <= upper` under `total_cmp`.
///
/// # Panics
///
/// Panics if `data` is empty or `ci_level` is outside (0, 1).
pub fn percentile_interval(data: &[f64], ci_level: f64) -> (f64, f64) {
    assert!(
        ci_level > 0.0 && ci_level < 1.0,
        "ci_level must be in (0, 1)"
    );
    let alpha = 1.0 - ci_level;
    let q = compute_quantiles(data, &[alpha / 2.0, 1.0 - alpha / 2.0]);
    (q[0], q[1])
}

/// Place multiple order statistics in their sorted positions.
///
/// After this returns, for each `i` in `indices` (sorted ascending),
/// `data[i]` holds the value a full sort would put there.
fn multi_select(data: &mut [f64], indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    multi_select_recursive(data, indices, 0, data.len());
}

fn multi_select_recursive(data: &mut [f64], indices: &[usize], lo: usize, hi: usize) {
    if indices.is_empty() || hi.saturating_sub(lo) <= 1 {
        return;
    }
    debug_assert!(indices[0] >= lo);
    debug_assert!(indices[indices.len() - 1] < hi);

    let mid = indices.len() / 2;
    let pivot = indices[mid];
    data[lo..hi].select_nth_unstable_by(pivot - lo, |a, b| a.total_cmp(b));

    if mid > 0 {
        multi_select_recursive(data, &indices[..mid], lo, pivot);
    }
    if mid + 1 < indices.len() {
        multi_select_recursive(data, &indices[mid + 1..], pivot + 1, hi);
    }
}
