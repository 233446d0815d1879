//! Result aggregation.
//!
//! Pure functions that turn the flat estimate list of a successful
//! comparison into per-category groups, a global price ranking and a
//! render-ready view.

mod group;
mod rank;
mod view;

pub use group::{CategoryGroup, dedupe_last_wins, group_by_category};
pub use rank::{best_price, global_ranks, rank_by_price};
pub use view::{CategoryProfile, EstimateRow, GroupView, ResultsView, freshness_label};
