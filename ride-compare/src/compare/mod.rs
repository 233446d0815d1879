//! Comparison round trip.
//!
//! [`CompareClient`] talks to the pricing backend; [`CompareOrchestrator`]
//! owns the loading/result/error lifecycle around it and guarantees that
//! only the most recent `compare()` call is reflected in its state.

mod client;
mod error;
mod orchestrator;
mod state;

pub use client::{ANDROID_EMULATOR_API_URL, CompareClient, CompareConfig, DEFAULT_API_URL};
pub use error::CompareError;
pub use orchestrator::{ComparisonBackend, CompareOrchestrator};
pub use state::{ComparisonEvent, ComparisonState};
