//! Per-category grouping.

use std::collections::HashMap;

use crate::domain::{Estimate, EstimateKey, RideCategory};

use super::rank::by_price;

/// Estimates sharing one ride category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub category: RideCategory,

    /// Sorted ascending by price; ties keep input order. Never empty.
    pub estimates: Vec<Estimate>,

    /// Key of the first estimate after sorting (the group's best deal)
    pub cheapest_key: EstimateKey,

    /// `|price[0] - price[1]|`, or 0 for a single-member group
    pub price_gap_to_second: f64,
}

impl CategoryGroup {
    fn from_members(category: RideCategory, mut estimates: Vec<Estimate>) -> Option<Self> {
        estimates.sort_by(by_price);

        let cheapest_key = estimates.first()?.key();
        let price_gap_to_second = match estimates.as_slice() {
            [first, second, ..] => (first.estimated_price - second.estimated_price).abs(),
            _ => 0.0,
        };

        Some(Self {
            category,
            estimates,
            cheapest_key,
            price_gap_to_second,
        })
    }

    pub fn cheapest(&self) -> &Estimate {
        &self.estimates[0]
    }

    pub fn is_cheapest(&self, estimate: &Estimate) -> bool {
        estimate.key() == self.cheapest_key
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }
}

/// Group estimates by category.
///
/// Unknown or missing categories group as `Standard`; the estimates
/// themselves are left untouched. Groups come out in order of first
/// appearance in the input. Flattening the groups yields a permutation of
/// the input.
pub fn group_by_category(estimates: &[Estimate]) -> Vec<CategoryGroup> {
    let mut order: Vec<RideCategory> = Vec::new();
    let mut members: HashMap<RideCategory, Vec<Estimate>> = HashMap::new();

    for estimate in estimates {
        let category = estimate.normalized_category.grouping();
        members
            .entry(category)
            .or_insert_with(|| {
                order.push(category);
                Vec::new()
            })
            .push(estimate.clone());
    }

    order
        .into_iter()
        .filter_map(|category| {
            let group = members.remove(&category)?;
            CategoryGroup::from_members(category, group)
        })
        .collect()
}

/// Drop estimates whose `(provider, category)` key reappears later.
///
/// The last occurrence of each key survives, at its own position.
pub fn dedupe_last_wins(estimates: &[Estimate]) -> Vec<Estimate> {
    let mut last: HashMap<EstimateKey, usize> = HashMap::with_capacity(estimates.len());
    for (index, estimate) in estimates.iter().enumerate() {
        last.insert(estimate.key(), index);
    }

    estimates
        .iter()
        .enumerate()
        .filter(|(index, estimate)| last.get(&estimate.key()) == Some(index))
        .map(|(_, estimate)| estimate.clone())
        .collect()
}
