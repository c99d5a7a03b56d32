//! Core domain types for the Itinera tour planner.
//!
//! The crate models the region's location catalogue, the visitor's interest
//! selection, precomputed travel-cost tables and the closest-first tour
//! built from them. Routing services sit behind the [`TravelCostProvider`]
//! and [`DirectionsProvider`] traits so the logic here stays synchronous and
//! free of network concerns.

pub mod category;
pub mod directions;
pub mod distance_graph;
pub mod interests;
pub mod location;
pub mod opening_hours;
pub mod sequencer;
pub mod tour;
pub mod travel_cost;
pub mod user_distances;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use category::Category;
pub use directions::{
    DirectionsError, DirectionsProvider, Maneuver, ManeuverIcon, RouteDirections, RouteStep,
    format_distance, format_distance_km, format_duration, format_step_instruction,
    total_route_info,
};
pub use distance_graph::DistanceGraph;
pub use interests::InterestSelection;
pub use location::{Catalogue, CatalogueError, Location, Waypoint};
pub use opening_hours::{OpeningHours, OpeningHoursError, is_open, order_by_open_status};
pub use sequencer::{
    DEFAULT_CLOSEST_LIMIT, closest_destinations, distance_to_destination, sort_by_closest,
};
pub use tour::{Leg, Tour};
pub use travel_cost::{TravelCost, TravelCostError, TravelCostProvider};
pub use user_distances::UserDistances;
