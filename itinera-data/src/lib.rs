//! Data access for the Itinera tour planner.
//!
//! Responsibilities:
//! - Call the Mapbox Matrix and Directions APIs behind the core provider
//!   traits.
//! - Build the precomputed distance graph and user-distance table.
//! - Load and save the JSON data files.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `itinera-core`).
//! - Keep blocking I/O off async executors.
//!
//! Invariants:
//! - Access tokens never reach logs or error messages.
//! - No global mutable state.

pub mod builders;
pub mod persistence;
pub mod routing;

pub use builders::{
    BuildOptions, BuildReport, build_distance_graph, build_user_distances, summarise_closest,
    summarise_edges,
};
pub use persistence::{
    PersistenceError, load_catalogue, load_distance_graph, load_user_distances,
    write_distance_graph, write_user_distances,
};
pub use routing::{
    MapboxConfig, MapboxDirectionsClient, MapboxMatrixClient, MapboxProfile, ProviderBuildError,
};
