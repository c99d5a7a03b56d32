//! Travel-cost provider trait and the distance/duration pair it yields.

use serde::{Deserialize, Serialize};

use crate::Waypoint;

use super::error::TravelCostError;

/// Driving distance and duration for one hop.
///
/// Serialises as `{"distance": metres, "duration": seconds}`, the shape used
/// by both precomputed tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelCost {
    /// Distance in metres.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl TravelCost {
    /// Construct a cost from metres and seconds.
    #[must_use]
    pub const fn new(distance: f64, duration: f64) -> Self {
        Self { distance, duration }
    }
}

/// Fetch the travel cost of a single ordered hop.
///
/// Costs need not be symmetric: `travel_cost(a, b)` and `travel_cost(b, a)`
/// may differ on one-way road networks.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use itinera_core::{TravelCost, TravelCostError, TravelCostProvider, Waypoint};
///
/// struct Crow;
///
/// impl TravelCostProvider for Crow {
///     fn travel_cost(&self, from: &Waypoint, to: &Waypoint) -> Result<TravelCost, TravelCostError> {
///         let dx = to.longitude - from.longitude;
///         let dy = to.latitude - from.latitude;
///         let metres = (dx * dx + dy * dy).sqrt() * 111_000.0;
///         Ok(TravelCost::new(metres, metres / 10.0))
///     }
/// }
///
/// let a = Waypoint::new("A", Coord { x: 120.0, y: 18.0 });
/// let b = Waypoint::new("B", Coord { x: 120.0, y: 18.01 });
/// let cost = Crow.travel_cost(&a, &b)?;
/// assert!(cost.distance > 1_000.0);
/// # Ok::<(), TravelCostError>(())
/// ```
pub trait TravelCostProvider {
    /// Return the cost of travelling from `from` to `to`.
    fn travel_cost(&self, from: &Waypoint, to: &Waypoint) -> Result<TravelCost, TravelCostError>;
}

impl<T: TravelCostProvider + ?Sized> TravelCostProvider for &T {
    fn travel_cost(&self, from: &Waypoint, to: &Waypoint) -> Result<TravelCost, TravelCostError> {
        (**self).travel_cost(from, to)
    }
}
