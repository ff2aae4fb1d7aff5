//! Utility functions for the gridlearn crate

use rand::{Rng, distr::StandardUniform, prelude::IndexedRandom};

/// Sample one item from a weighted list.
///
/// Weights need not sum to one; they are normalized on the fly. A list whose
/// total weight is zero or negative falls back to uniform sampling.
///
/// # Returns
///
/// `None` only when `items` is empty.
///
/// # Examples
///
/// ```
/// use gridlearn::utils::weighted_sample;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let picked = weighted_sample(&mut rng, &[("only", 1.0)]);
/// assert_eq!(picked, Some("only"));
/// ```
pub fn weighted_sample<R, T, W>(rng: &mut R, items: &[(T, W)]) -> Option<T>
where
    R: Rng + ?Sized,
    T: Clone,
    W: Into<f64> + Copy,
{
    if items.is_empty() {
        return None;
    }

    let total: f64 = items.iter().map(|(_, w)| (*w).into()).sum();

    if total <= 0.0 {
        return items.choose(rng).map(|(item, _)| item.clone());
    }

    let mut threshold = rng.sample::<f64, _>(StandardUniform) * total;

    for (item, weight) in items {
        let w = (*weight).into();
        if threshold < w {
            return Some(item.clone());
        }
        threshold -= w;
    }

    // Floating point leftovers land on the last item
    items.last().map(|(item, _)| item.clone())
}

/// Round to a fixed number of decimal digits.
///
/// ```
/// use gridlearn::utils::round_to;
///
/// assert_eq!(round_to(0.10000000000000002, 3), 0.1);
/// assert_eq!(round_to(-0.4567, 2), -0.46);
/// ```
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}

/// Index of the first maximal value, so ties resolve to the earliest entry.
///
/// Returns `None` for an empty slice.
pub fn first_argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in values.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}
