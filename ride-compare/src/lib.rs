//! Ride-hailing price comparison client core.
//!
//! Takes a pickup and a dropoff typed as free text, resolves them through
//! a geocoding provider, asks the comparison backend for every provider's
//! estimate and arranges the answer for display:
//!
//! - [`search`]: debounced, race-safe address suggestions
//! - [`compare`]: single-flight comparison requests
//! - [`aggregate`]: per-category grouping and global price ranking

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod mock;
pub mod search;
