//! Closest-first ordering of destinations.
//!
//! Destinations are ranked by their precomputed distance from the user
//! origin. This is a single-key sort over stored edge weights rather than a
//! graph search: there is no frontier and no relaxation.

use std::cmp::Ordering;

use crate::{Location, TravelCost, UserDistances};

/// Number of destinations returned by [`closest_destinations`] by default.
pub const DEFAULT_CLOSEST_LIMIT: usize = 5;

/// Sort destinations nearest-first by precomputed distance from the origin.
///
/// Destinations with no stored distance are placed after every destination
/// that has one. The sort is stable, so ties and unknown entries keep their
/// input order.
///
/// # Examples
/// ```
/// use itinera_core::{Category, Location, TravelCost, UserDistances, sort_by_closest};
/// use itinera_core::user_distances::default_origin;
///
/// let places = vec![
///     Location::new("Far", 18.5, 120.9, Category::Beaches),
///     Location::new("Unknown", 18.2, 120.6, Category::Museums),
///     Location::new("Near", 18.1, 120.5, Category::Churches),
/// ];
/// let mut table = UserDistances::new(default_origin());
/// table.insert("Far", TravelCost::new(60_000.0, 3_600.0));
/// table.insert("Near", TravelCost::new(1_000.0, 120.0));
///
/// let sorted = sort_by_closest(&places, &table);
/// let titles: Vec<_> = sorted.iter().map(|l| l.title.as_str()).collect();
/// assert_eq!(titles, ["Near", "Far", "Unknown"]);
/// ```
#[must_use]
pub fn sort_by_closest(destinations: &[Location], distances: &UserDistances) -> Vec<Location> {
    let mut ranked: Vec<(Option<f64>, &Location)> = destinations
        .iter()
        .map(|location| {
            let distance = distances
                .distance_to(&location.title)
                .map(|cost| cost.distance);
            (distance, location)
        })
        .collect();
    ranked.sort_by(|(a, _), (b, _)| compare_known_first(*a, *b));
    ranked
        .into_iter()
        .map(|(_, location)| location.clone())
        .collect()
}

fn compare_known_first(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The `limit` nearest destinations, nearest first.
///
/// Use [`DEFAULT_CLOSEST_LIMIT`] for the usual top five.
#[must_use]
pub fn closest_destinations(
    destinations: &[Location],
    distances: &UserDistances,
    limit: usize,
) -> Vec<Location> {
    let mut sorted = sort_by_closest(destinations, distances);
    sorted.truncate(limit);
    sorted
}

/// Precomputed cost from the origin to the destination named `title`.
#[must_use]
pub fn distance_to_destination(title: &str, distances: &UserDistances) -> Option<TravelCost> {
    distances.distance_to(title).copied()
}
