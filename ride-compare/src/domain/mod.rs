//! Domain types for ride comparison.
//!
//! This module contains the data model shared by location search, the
//! comparison round trip and result aggregation. Types that carry
//! invariants (coordinates, trip requests) enforce them at construction
//! time, so code that receives them can trust their validity.

mod category;
mod coords;
mod error;
mod estimate;
mod trip;

pub use category::{NormalizedCategory, RideCategory};
pub use coords::Coordinates;
pub use error::DomainError;
pub use estimate::{Estimate, EstimateKey};
pub use trip::{TripDraft, TripRequest};
