//! Turn-by-turn driving directions between two waypoints.
//!
//! [`DirectionsProvider`] fetches a single route for one leg of a tour. The
//! formatting helpers turn the raw metres and seconds into the short labels
//! shown next to each instruction.

mod error;
mod format;
mod route;

pub use error::DirectionsError;
pub use format::{
    ManeuverIcon, format_distance, format_distance_km, format_duration,
    format_step_instruction, total_route_info,
};
pub use route::{DirectionsProvider, Maneuver, RouteDirections, RouteStep};
