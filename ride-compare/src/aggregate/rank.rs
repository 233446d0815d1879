//! Global price ranking.
//!
//! Ranks estimates across the whole response, independent of category.
//! Ties keep their input order.

use std::cmp::Ordering;

use crate::domain::Estimate;

/// Price ordering shared by the global ranking and per-group sorting.
pub(super) fn by_price(a: &Estimate, b: &Estimate) -> Ordering {
    a.estimated_price.total_cmp(&b.estimated_price)
}

/// Estimates sorted ascending by price.
///
/// The sort is stable, so equally priced estimates keep their input order.
pub fn rank_by_price(estimates: &[Estimate]) -> Vec<Estimate> {
    let mut ranked = estimates.to_vec();
    ranked.sort_by(by_price);
    ranked
}

/// 1-based global rank of each estimate, aligned with the input.
///
/// `global_ranks(e)[i]` is the position `e[i]` would take in
/// [`rank_by_price`].
pub fn global_ranks(estimates: &[Estimate]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..estimates.len()).collect();
    order.sort_by(|&a, &b| by_price(&estimates[a], &estimates[b]));

    let mut ranks = vec![0; estimates.len()];
    for (position, index) in order.into_iter().enumerate() {
        ranks[index] = position + 1;
    }
    ranks
}

/// The single lowest-priced estimate, first in input order on ties.
pub fn best_price(estimates: &[Estimate]) -> Option<&Estimate> {
    estimates.iter().min_by(|a, b| by_price(a, b))
}
