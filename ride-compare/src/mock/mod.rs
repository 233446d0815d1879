//! Development comparison backend.
//!
//! Serves `POST /compare` and `GET /health` from canned estimates so the
//! client can be exercised without provider credentials. Prices are not
//! computed; they come straight from the fixture file.

mod error;
mod fixtures;
mod redirect;
mod server;

pub use error::MockError;
pub use fixtures::EstimateFixtures;
pub use redirect::redirect_url;
pub use server::{MockState, create_router};
