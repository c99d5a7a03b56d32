//! Point-to-point travel costs between waypoints.
//!
//! The [`TravelCostProvider`] trait abstracts the routing service used by
//! the offline builders. Callers supply an ordered `(from, to)` pair and
//! receive the driving distance and duration for that single hop.

mod error;
mod provider;

pub use error::TravelCostError;
pub use provider::{TravelCost, TravelCostProvider};
