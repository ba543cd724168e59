//! Residual-correction helpers shared by every calculator that redistributes
//! percentages. Percentage math drifts; these are the only two places the
//! drift is put back.

/// Scales `buckets` so their sum equals `expected_total` exactly. The
/// residual is distributed proportionally to each bucket's current share;
/// when the current total is ~zero the whole residual lands in bucket 0.
pub fn reconcile_to_total(buckets: &mut [f64], expected_total: f64) {
    if buckets.is_empty() {
        return;
    }

    let current: f64 = buckets.iter().sum();
    let residual = expected_total - current;
    if residual.abs() < f64::EPSILON {
        return;
    }

    if current.abs() < 1e-9 {
        buckets[0] += residual;
        return;
    }

    for bucket in buckets.iter_mut() {
        *bucket += residual * (*bucket / current);
    }
}

/// Splits an integer `total` by `percentages` (0-100 each). Each share is
/// rounded, then the rounding residual is corrected onto the first bucket;
/// when that would drive the first bucket negative, the remainder is drained
/// from subsequent buckets instead. The returned values always sum to the
/// share-weighted total (i.e. `total` when the percentages sum to 100).
pub fn distribute_integer(total: u64, percentages: &[f64]) -> Vec<u64> {
    if percentages.is_empty() {
        return Vec::new();
    }

    let mut shares: Vec<i64> = percentages
        .iter()
        .map(|pct| (total as f64 * pct / 100.0).round() as i64)
        .collect();

    let fraction: f64 = percentages.iter().sum::<f64>() / 100.0;
    let expected = (total as f64 * fraction).round() as i64;
    let mut residual = expected - shares.iter().sum::<i64>();

    for share in shares.iter_mut() {
        if residual == 0 {
            break;
        }
        let adjusted = (*share + residual).max(0);
        residual -= adjusted - *share;
        *share = adjusted;
    }

    shares.into_iter().map(|share| share.max(0) as u64).collect()
}
