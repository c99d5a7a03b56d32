//! Step-by-step navigation through an ordered list of stops.
//!
//! A tour starts at the origin (position `0`). Stepping forward from the
//! last stop wraps back to the origin, and stepping back from the origin
//! wraps to the last stop. Every move yields the [`Leg`] whose directions
//! should be shown next.

use crate::{Location, Waypoint};

/// One hop of the tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Where the hop starts.
    pub from: Waypoint,
    /// Where the hop ends.
    pub to: Waypoint,
}

/// Cursor over an origin followed by ordered stops.
///
/// # Examples
/// ```
/// use itinera_core::{Category, Location, Tour};
/// use itinera_core::user_distances::default_origin;
///
/// let stops = vec![
///     Location::new("Paoay Church", 18.06, 120.52, Category::Churches),
///     Location::new("Saud Beach", 18.63, 120.84, Category::Beaches),
/// ];
/// let mut tour = Tour::new(default_origin(), stops);
///
/// let leg = tour.next().expect("tour has stops");
/// assert_eq!(leg.from.title, "Your Location (CCIS)");
/// assert_eq!(leg.to.title, "Paoay Church");
/// assert_eq!(tour.progress(), (1, 2));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    origin: Waypoint,
    stops: Vec<Location>,
    position: usize,
}

impl Tour {
    /// Start a tour at `origin`.
    #[must_use]
    pub const fn new(origin: Waypoint, stops: Vec<Location>) -> Self {
        Self {
            origin,
            stops,
            position: 0,
        }
    }

    /// The ordered stops.
    #[must_use]
    pub fn stops(&self) -> &[Location] {
        &self.stops
    }

    /// The tour origin.
    #[must_use]
    pub const fn origin(&self) -> &Waypoint {
        &self.origin
    }

    /// Current position and number of stops; position `0` is the origin.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.position, self.stops.len())
    }

    /// Whether the cursor is at the origin.
    #[must_use]
    pub const fn at_origin(&self) -> bool {
        self.position == 0
    }

    /// Title of the place the cursor is at.
    #[must_use]
    pub fn current_label(&self) -> &str {
        self.stop(self.position)
            .map_or(self.origin.title.as_str(), |stop| stop.title.as_str())
    }

    /// The leg leading to the current position, without moving.
    ///
    /// At the origin this is the leg to the first stop. Returns `None` when
    /// the tour has no stops.
    #[must_use]
    pub fn current_leg(&self) -> Option<Leg> {
        if self.position == 0 {
            let first = self.stops.first()?;
            return Some(Leg {
                from: self.origin.clone(),
                to: first.waypoint(),
            });
        }
        let to = self.stop(self.position)?.waypoint();
        let from = self
            .stop(self.position - 1)
            .map_or_else(|| self.origin.clone(), Location::waypoint);
        Some(Leg { from, to })
    }

    /// Advance one position, wrapping from the last stop to the origin.
    ///
    /// Returns `None`, without moving, when the tour has no stops.
    pub fn next(&mut self) -> Option<Leg> {
        if self.stops.is_empty() {
            return None;
        }
        self.position = if self.position == self.stops.len() {
            0
        } else {
            self.position + 1
        };
        self.current_leg()
    }

    /// Step back one position, wrapping from the origin to the last stop.
    ///
    /// Returns `None`, without moving, when the tour has no stops.
    pub fn previous(&mut self) -> Option<Leg> {
        if self.stops.is_empty() {
            return None;
        }
        self.position = if self.position == 0 {
            self.stops.len()
        } else {
            self.position - 1
        };
        self.current_leg()
    }

    /// Every leg in visiting order: origin to the first stop, then stop to
    /// stop.
    #[must_use]
    pub fn legs(&self) -> Vec<Leg> {
        let mut cursor = Self::new(self.origin.clone(), self.stops.clone());
        (0..self.stops.len()).filter_map(|_| cursor.next()).collect()
    }

    /// Stop at 1-based `position`; position `0` has no stop.
    fn stop(&self, position: usize) -> Option<&Location> {
        position
            .checked_sub(1)
            .and_then(|index| self.stops.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use crate::user_distances::default_origin;
    use rstest::{fixture, rstest};

    #[fixture]
    fn tour() -> Tour {
        let stops = ["One", "Two", "Three"]
            .into_iter()
            .map(|title| Location::new(title, 18.0, 120.0, Category::Landmarks))
            .collect();
        Tour::new(default_origin(), stops)
    }

    fn endpoints(leg: &Leg) -> (&str, &str) {
        (leg.from.title.as_str(), leg.to.title.as_str())
    }

    #[rstest]
    fn forward_walk_wraps_to_origin(mut tour: Tour) {
        let origin = "Your Location (CCIS)";
        let expected = [
            (origin, "One"),
            ("One", "Two"),
            ("Two", "Three"),
            (origin, "One"),
        ];
        for (step, want) in expected.into_iter().enumerate() {
            let leg = tour.next().expect("non-empty tour");
            assert_eq!(endpoints(&leg), want, "step {step}");
        }
        assert!(tour.at_origin());
        assert_eq!(tour.current_label(), origin);
    }

    #[rstest]
    fn backward_from_origin_wraps_to_last_stop(mut tour: Tour) {
        let leg = tour.previous().expect("non-empty tour");
        assert_eq!(endpoints(&leg), ("Two", "Three"));
        assert_eq!(tour.progress(), (3, 3));
        assert_eq!(tour.current_label(), "Three");
    }

    #[rstest]
    fn previous_undoes_next(mut tour: Tour) {
        tour.next();
        tour.next();
        let leg = tour.previous().expect("non-empty tour");
        assert_eq!(endpoints(&leg), ("Your Location (CCIS)", "One"));
        assert_eq!(tour.progress(), (1, 3));
    }

    #[rstest]
    fn legs_cover_every_stop_once(tour: Tour) {
        let legs = tour.legs();
        let hops: Vec<_> = legs.iter().map(endpoints).collect();
        assert_eq!(
            hops,
            [
                ("Your Location (CCIS)", "One"),
                ("One", "Two"),
                ("Two", "Three")
            ]
        );
    }

    #[test]
    fn empty_tour_does_not_move() {
        let mut tour = Tour::new(default_origin(), Vec::new());
        assert!(tour.next().is_none());
        assert!(tour.previous().is_none());
        assert!(tour.current_leg().is_none());
        assert_eq!(tour.progress(), (0, 0));
    }
}
