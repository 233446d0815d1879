//! Comparison lifecycle state machine.
//!
//! - `Idle` --Started--> `Loading`
//! - `Loading` --Succeeded--> `Succeeded`
//! - `Loading` --Failed--> `Failed`
//! - `Succeeded` | `Failed` --Started--> `Loading`
//!
//! There is no way back to `Idle` once a comparison has started.

use chrono::{DateTime, Utc};

use crate::domain::Estimate;

/// Observable state of a comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ComparisonState {
    /// No comparison started yet
    #[default]
    Idle,

    /// A request is outstanding; previous results and errors are gone
    Loading,

    /// The latest request returned estimates
    Succeeded {
        estimates: Vec<Estimate>,
        received_at: DateTime<Utc>,
    },

    /// The latest request failed with a user-facing message
    Failed(String),
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonEvent {
    /// A new comparison was dispatched
    Started,

    /// The outstanding comparison returned estimates
    Succeeded {
        estimates: Vec<Estimate>,
        received_at: DateTime<Utc>,
    },

    /// The outstanding comparison failed
    Failed(String),
}

impl ComparisonState {
    /// Transition function.
    ///
    /// `Started` always enters `Loading`, discarding any previous result
    /// or error. Settlement events only apply while `Loading`; a settlement
    /// in any other state has no outstanding request to belong to and is
    /// ignored.
    pub fn apply(self, event: ComparisonEvent) -> ComparisonState {
        match (self, event) {
            (_, ComparisonEvent::Started) => ComparisonState::Loading,
            (
                ComparisonState::Loading,
                ComparisonEvent::Succeeded {
                    estimates,
                    received_at,
                },
            ) => ComparisonState::Succeeded {
                estimates,
                received_at,
            },
            (ComparisonState::Loading, ComparisonEvent::Failed(message)) => {
                ComparisonState::Failed(message)
            }
            (state, _) => state,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ComparisonState::Loading)
    }

    /// Whether the latest comparison has settled.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            ComparisonState::Succeeded { .. } | ComparisonState::Failed(_)
        )
    }

    /// Estimates of a successful comparison, empty otherwise.
    pub fn estimates(&self) -> &[Estimate] {
        match self {
            ComparisonState::Succeeded { estimates, .. } => estimates,
            _ => &[],
        }
    }

    /// Error message of a failed comparison.
    pub fn error(&self) -> Option<&str> {
        match self {
            ComparisonState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NormalizedCategory, RideCategory};

    fn estimate(provider: &str, price: f64) -> Estimate {
        Estimate {
            provider: provider.to_string(),
            normalized_category: NormalizedCategory::Known(RideCategory::Standard),
            estimated_price: price,
            eta_minutes: 5,
            redirect_url: String::new(),
        }
    }

    fn succeeded(estimates: Vec<Estimate>) -> ComparisonEvent {
        ComparisonEvent::Succeeded {
            estimates,
            received_at: Utc::now(),
        }
    }

    #[test]
    fn starts_idle() {
        let state = ComparisonState::default();
        assert_eq!(state, ComparisonState::Idle);
        assert!(!state.is_loading());
        assert!(!state.is_settled());
        assert!(state.estimates().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn started_enters_loading_from_any_state() {
        let idle = ComparisonState::Idle;
        assert!(idle.apply(ComparisonEvent::Started).is_loading());

        let failed = ComparisonState::Failed("boom".into());
        let loading = failed.apply(ComparisonEvent::Started);
        assert!(loading.is_loading());
        assert!(loading.error().is_none());

        let done = ComparisonState::Loading.apply(succeeded(vec![estimate("Uber", 10.0)]));
        let loading = done.apply(ComparisonEvent::Started);
        assert!(loading.is_loading());
        assert!(loading.estimates().is_empty());
    }

    #[test]
    fn loading_settles_to_success() {
        let state = ComparisonState::Loading.apply(succeeded(vec![estimate("Lyft", 11.0)]));

        assert!(state.is_settled());
        assert_eq!(state.estimates().len(), 1);
        assert_eq!(state.estimates()[0].provider, "Lyft");
    }

    #[test]
    fn loading_settles_to_failure() {
        let state = ComparisonState::Loading.apply(ComparisonEvent::Failed("down".into()));

        assert!(state.is_settled());
        assert_eq!(state.error(), Some("down"));
        assert!(state.estimates().is_empty());
    }

    #[test]
    fn settlement_outside_loading_is_ignored() {
        let idle = ComparisonState::Idle.apply(ComparisonEvent::Failed("late".into()));
        assert_eq!(idle, ComparisonState::Idle);

        let failed = ComparisonState::Failed("first".into());
        let still_failed = failed.apply(succeeded(vec![estimate("Uber", 10.0)]));
        assert_eq!(still_failed.error(), Some("first"));
    }
}
