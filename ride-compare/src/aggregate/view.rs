//! Render-ready view of a comparison result.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::compare::ComparisonState;
use crate::domain::{Estimate, EstimateKey, RideCategory};

use super::group::{CategoryGroup, dedupe_last_wins, group_by_category};
use super::rank::global_ranks;

/// Display metadata for a ride category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProfile {
    pub icon: &'static str,
    pub description: &'static str,
    pub co2: &'static str,
}

static STANDARD: CategoryProfile = CategoryProfile {
    icon: "🚗",
    description: "Affordable rides for everyday trips",
    co2: "2.5 kg CO\u{2082} per trip",
};

static XL: CategoryProfile = CategoryProfile {
    icon: "👥",
    description: "Extra space for up to 6 passengers",
    co2: "3.2 kg CO\u{2082} per trip",
};

static PREMIUM: CategoryProfile = CategoryProfile {
    icon: "⚡",
    description: "High-end vehicles with top-rated drivers",
    co2: "2.8 kg CO\u{2082} per trip",
};

impl CategoryProfile {
    pub fn for_category(category: RideCategory) -> &'static CategoryProfile {
        match category {
            RideCategory::Standard => &STANDARD,
            RideCategory::Xl => &XL,
            RideCategory::Premium => &PREMIUM,
        }
    }

    /// Profile for a raw category name. Unrecognised names get the
    /// Standard profile.
    pub fn for_name(name: &str) -> &'static CategoryProfile {
        name.parse()
            .map(Self::for_category)
            .unwrap_or(&STANDARD)
    }
}

/// One estimate as rendered inside its category group.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateRow {
    pub estimate: Estimate,

    /// 1-based position across the whole response
    pub global_rank: usize,

    /// Cheapest within its category
    pub is_best_deal: bool,

    /// Cheapest across all categories
    pub is_best_price: bool,
}

impl EstimateRow {
    pub fn key(&self) -> EstimateKey {
        self.estimate.key()
    }

    pub fn price_label(&self) -> String {
        format!("${:.2}", self.estimate.estimated_price)
    }

    pub fn eta_label(&self) -> String {
        format!("{} min away", self.estimate.eta_minutes)
    }

    pub fn action_label(&self) -> String {
        format!("Book with {}", self.estimate.provider)
    }
}

/// One category section.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub category: RideCategory,
    pub profile: &'static CategoryProfile,

    /// Cheapest first
    pub rows: Vec<EstimateRow>,

    pub price_gap_to_second: f64,
}

impl GroupView {
    fn new(group: CategoryGroup, ranks: &HashMap<EstimateKey, usize>) -> Self {
        let rows = group
            .estimates
            .iter()
            .map(|estimate| {
                let global_rank = ranks.get(&estimate.key()).copied().unwrap_or(0);
                EstimateRow {
                    estimate: estimate.clone(),
                    global_rank,
                    is_best_deal: group.is_cheapest(estimate),
                    is_best_price: global_rank == 1,
                }
            })
            .collect();

        Self {
            category: group.category,
            profile: CategoryProfile::for_category(group.category),
            rows,
            price_gap_to_second: group.price_gap_to_second,
        }
    }

    /// `Save $x.xx` when the two cheapest differ in price.
    pub fn savings_label(&self) -> Option<String> {
        (self.price_gap_to_second > 0.0).then(|| format!("Save ${:.2}", self.price_gap_to_second))
    }

    pub fn best_deal(&self) -> Option<&EstimateRow> {
        self.rows.iter().find(|row| row.is_best_deal)
    }
}

/// Grouped and ranked result of a successful comparison.
///
/// Estimates repeating a `(provider, category)` key are collapsed to the
/// last occurrence before grouping and ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub groups: Vec<GroupView>,
    pub received_at: DateTime<Utc>,
}

impl ResultsView {
    /// Build the view for a response received at `received_at`.
    pub fn build(estimates: &[Estimate], received_at: DateTime<Utc>) -> Self {
        let estimates = dedupe_last_wins(estimates);

        let ranks: HashMap<EstimateKey, usize> = estimates
            .iter()
            .map(Estimate::key)
            .zip(global_ranks(&estimates))
            .collect();

        let groups = group_by_category(&estimates)
            .into_iter()
            .map(|group| GroupView::new(group, &ranks))
            .collect();

        Self {
            groups,
            received_at,
        }
    }

    /// View for a settled successful state; `None` otherwise.
    pub fn from_state(state: &ComparisonState) -> Option<Self> {
        match state {
            ComparisonState::Succeeded {
                estimates,
                received_at,
            } => Some(Self::build(estimates, *received_at)),
            _ => None,
        }
    }

    /// Nothing to render. An empty response is not an error.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }

    pub fn rows(&self) -> impl Iterator<Item = &EstimateRow> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }

    /// The global best-price row.
    pub fn best_price(&self) -> Option<&EstimateRow> {
        self.rows().find(|row| row.is_best_price)
    }

    pub fn freshness_label(&self, now: DateTime<Utc>) -> String {
        freshness_label(self.received_at, now)
    }

    /// Text rendering with freshness relative to `now`.
    pub fn display_at(&self, now: DateTime<Utc>) -> impl fmt::Display + '_ {
        Rendered { view: self, now }
    }
}

/// "Updated just now" for under a minute, then "Updated N min ago".
pub fn freshness_label(received_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match (now - received_at).num_minutes() {
        minutes if minutes < 1 => "Updated just now".to_string(),
        minutes => format!("Updated {minutes} min ago"),
    }
}

struct Rendered<'a> {
    view: &'a ResultsView,
    now: DateTime<Utc>,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.view.is_empty() {
            return Ok(());
        }

        writeln!(f, "Available Rides ({})", self.view.freshness_label(self.now))?;

        for group in &self.view.groups {
            writeln!(f)?;
            write!(f, "{} {}", group.profile.icon, group.category)?;
            if let Some(savings) = group.savings_label() {
                write!(f, "  {savings}")?;
            }
            writeln!(f)?;
            writeln!(f, "   {}", group.profile.description)?;
            writeln!(f, "   {}", group.profile.co2)?;

            for row in &group.rows {
                write!(
                    f,
                    "   #{:<2} {:<10} {:>8}  {}",
                    row.global_rank,
                    row.estimate.provider,
                    row.price_label(),
                    row.eta_label()
                )?;
                if row.is_best_deal {
                    write!(f, "  [Best Deal]")?;
                }
                if row.is_best_price {
                    write!(f, "  [Best Price]")?;
                }
                writeln!(f)?;
                if row.estimate.has_redirect() {
                    writeln!(f, "       {}: {}", row.action_label(), row.estimate.redirect_url)?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_at(Utc::now()))
    }
}
