//! Facade crate for the Itinera tour planner.
//!
//! This crate re-exports the core domain types and, behind the
//! `routing-mapbox` feature, the Mapbox clients, offline builders and data
//! file loaders.

#![forbid(unsafe_code)]

pub use itinera_core::{
    Catalogue, CatalogueError, Category, DirectionsError, DirectionsProvider, DistanceGraph,
    InterestSelection, Leg, Location, OpeningHours, RouteDirections, RouteStep, Tour, TravelCost,
    TravelCostError, TravelCostProvider, UserDistances, Waypoint, closest_destinations,
    order_by_open_status, sort_by_closest,
};

#[cfg(feature = "routing-mapbox")]
pub use itinera_data::{
    BuildOptions, BuildReport, MapboxConfig, MapboxDirectionsClient, MapboxMatrixClient,
    MapboxProfile, PersistenceError, build_distance_graph, build_user_distances, load_catalogue,
    load_distance_graph, load_user_distances, write_distance_graph, write_user_distances,
};
