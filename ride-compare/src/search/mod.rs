//! Debounced, race-safe location search.
//!
//! Turns keystrokes into address suggestions:
//! - every keystroke restarts a debounce timer; only a timer that survives
//!   the full interval issues a lookup
//! - each lookup is tagged with a generation number, and a result is only
//!   applied if no newer keystroke arrived since it was issued
//! - selecting a suggestion resolves it into [`Coordinates`](crate::domain::Coordinates)

mod config;
mod location;

pub use config::SearchConfig;
pub use location::{LocationSearch, SearchView};
