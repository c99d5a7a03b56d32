//! Precomputed travel costs from the fixed user origin.

use std::collections::BTreeMap;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{TravelCost, Waypoint};

/// Title of the default origin.
pub const DEFAULT_ORIGIN_TITLE: &str = "Your Location (CCIS)";
/// Latitude of the default origin.
pub const DEFAULT_ORIGIN_LATITUDE: f64 = 18.059_779;
/// Longitude of the default origin.
pub const DEFAULT_ORIGIN_LONGITUDE: f64 = 120.545_021;

/// The waypoint every user distance is measured from unless overridden.
///
/// # Examples
/// ```
/// use itinera_core::user_distances::default_origin;
///
/// let origin = default_origin();
/// assert_eq!(origin.title, "Your Location (CCIS)");
/// ```
#[must_use]
pub fn default_origin() -> Waypoint {
    Waypoint::new(
        DEFAULT_ORIGIN_TITLE,
        Coord {
            x: DEFAULT_ORIGIN_LONGITUDE,
            y: DEFAULT_ORIGIN_LATITUDE,
        },
    )
}

/// Travel costs from one origin to each reachable destination.
///
/// Serialises as `{"userLocation": {...}, "distances": {title: cost}}`.
///
/// # Examples
/// ```
/// use itinera_core::{TravelCost, UserDistances};
/// use itinera_core::user_distances::default_origin;
///
/// let mut table = UserDistances::new(default_origin());
/// table.insert("Paoay Church", TravelCost::new(5_420.0, 600.0));
/// assert_eq!(table.distance_to("Paoay Church").map(|c| c.distance), Some(5_420.0));
/// assert!(table.distance_to("Saud Beach").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDistances {
    user_location: Waypoint,
    distances: BTreeMap<String, TravelCost>,
}

impl UserDistances {
    /// Construct an empty table for `origin`.
    #[must_use]
    pub fn new(origin: Waypoint) -> Self {
        Self {
            user_location: origin,
            distances: BTreeMap::new(),
        }
    }

    /// The origin all costs are measured from.
    #[must_use]
    pub const fn origin(&self) -> &Waypoint {
        &self.user_location
    }

    /// Record the cost to `title`, replacing any earlier value.
    pub fn insert(&mut self, title: impl Into<String>, cost: TravelCost) {
        self.distances.insert(title.into(), cost);
    }

    /// Cost from the origin to `title`, if it was computed.
    #[must_use]
    pub fn distance_to(&self, title: &str) -> Option<&TravelCost> {
        self.distances.get(title)
    }

    /// Iterate `(title, cost)` pairs ordered by title.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TravelCost)> {
        self.distances.iter().map(|(title, cost)| (title.as_str(), cost))
    }

    /// The `limit` nearest stored destinations, nearest first.
    ///
    /// Ties are broken by title so the result is deterministic.
    #[must_use]
    pub fn closest(&self, limit: usize) -> Vec<(&str, &TravelCost)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance));
        entries.truncate(limit);
        entries
    }

    /// Number of stored destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Whether no destination has a stored cost.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
