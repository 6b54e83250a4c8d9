use rand::Rng;

/// Sample an index from a normalised probability sequence.
///
/// Walks the cumulative sum and returns the first index whose running total
/// reaches the draw; rounding slack falls through to the last index.
pub fn roulette_wheel_selection<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> usize {
    let r: f64 = rng.gen();
    let mut sum = 0.0;

    for (i, p) in probabilities.iter().enumerate() {
        sum += p;
        if r <= sum {
            return i;
        }
    }

    probabilities.len().saturating_sub(1)
}

/// Index of the largest value; the first occurrence wins ties.
pub fn argmax_first(values: &[f64]) -> usize {
    let mut best_k = 0;
    let mut best = f64::NEG_INFINITY;
    for (k, &v) in values.iter().enumerate() {
        if v > best {
            best = v;
            best_k = k;
        }
    }
    best_k
}

/// Normalise weights into probabilities, or spread evenly when the total is
/// too small (or not finite) to divide by.
pub fn normalise_or_uniform(weights: &mut [f64], epsilon: f64) {
    if weights.is_empty() {
        return;
    }

    let total: f64 = weights.iter().sum();
    if total.is_finite() && total > epsilon {
        for w in weights.iter_mut() {
            *w /= total;
        }
    } else {
        let uniform = 1.0 / weights.len() as f64;
        weights.fill(uniform);
    }
}
