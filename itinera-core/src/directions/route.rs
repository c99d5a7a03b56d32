use geo::LineString;

use crate::Waypoint;

use super::error::DirectionsError;

/// What the driver does at the start of a step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Maneuver {
    /// Maneuver type, e.g. `turn`, `depart`, `arrive`, `roundabout`.
    pub kind: String,
    /// Direction qualifier, e.g. `left` or `slight right`.
    pub modifier: Option<String>,
    /// Human-readable instruction, e.g. `Turn left onto Rizal Street`.
    pub instruction: String,
}

/// One instruction of a route.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteStep {
    /// The maneuver that begins the step.
    pub maneuver: Maneuver,
    /// Length of the step in metres.
    pub distance: f64,
    /// Expected duration of the step in seconds.
    pub duration: f64,
    /// Road name, empty when unnamed.
    pub name: String,
}

/// A driving route for one leg, ready to draw and narrate.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDirections {
    /// Route shape in `lon, lat` order.
    pub geometry: LineString<f64>,
    /// Turn-by-turn instructions in travel order.
    pub steps: Vec<RouteStep>,
    /// Total distance in metres as reported by the service.
    pub distance: f64,
    /// Total duration in seconds as reported by the service.
    pub duration: f64,
    /// Title of the starting waypoint.
    pub from: String,
    /// Title of the destination waypoint.
    pub to: String,
}

/// Fetch driving directions for a single leg.
///
/// # Examples
///
/// ```rust
/// use geo::{Coord, LineString};
/// use itinera_core::{DirectionsError, DirectionsProvider, RouteDirections, Waypoint};
///
/// struct StraightLine;
///
/// impl DirectionsProvider for StraightLine {
///     fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RouteDirections, DirectionsError> {
///         Ok(RouteDirections {
///             geometry: LineString::from(vec![from.coord(), to.coord()]),
///             steps: Vec::new(),
///             distance: 0.0,
///             duration: 0.0,
///             from: from.title.clone(),
///             to: to.title.clone(),
///         })
///     }
/// }
///
/// let a = Waypoint::new("A", Coord { x: 120.5, y: 18.0 });
/// let b = Waypoint::new("B", Coord { x: 120.6, y: 18.1 });
/// let route = StraightLine.route(&a, &b)?;
/// assert_eq!(route.geometry.0.len(), 2);
/// # Ok::<(), DirectionsError>(())
/// ```
pub trait DirectionsProvider {
    /// Return the route from `from` to `to`.
    ///
    /// Implementations return [`DirectionsError::NoRoute`] when the service
    /// answers without a route.
    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RouteDirections, DirectionsError>;
}

impl<T: DirectionsProvider + ?Sized> DirectionsProvider for &T {
    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RouteDirections, DirectionsError> {
        (**self).route(from, to)
    }
}
