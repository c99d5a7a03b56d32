//! Deterministic providers and sample data for unit and behaviour tests.

use std::cell::RefCell;
use std::collections::HashMap;

use geo::LineString;

use crate::{
    Category, DirectionsError, DirectionsProvider, Location, Maneuver, RouteDirections, RouteStep,
    TravelCost, TravelCostError, TravelCostProvider, Waypoint,
};

/// `TravelCostProvider` returning the same cost for every hop.
#[derive(Debug, Clone, Copy)]
pub struct FixedTravelCostProvider {
    cost: TravelCost,
}

impl FixedTravelCostProvider {
    /// Create a provider that always answers `cost`.
    #[must_use]
    pub const fn new(cost: TravelCost) -> Self {
        Self { cost }
    }
}

impl TravelCostProvider for FixedTravelCostProvider {
    fn travel_cost(&self, _from: &Waypoint, _to: &Waypoint) -> Result<TravelCost, TravelCostError> {
        Ok(self.cost)
    }
}

/// `TravelCostProvider` answering from a table keyed by `(from, to)` title,
/// recording every request it receives.
///
/// Pairs missing from the table fail with [`TravelCostError::Unreachable`].
#[derive(Debug, Default)]
pub struct TableTravelCostProvider {
    costs: HashMap<(String, String), TravelCost>,
    requests: RefCell<Vec<(String, String)>>,
}

impl TableTravelCostProvider {
    /// Create an empty table; every request fails until costs are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the cost for the `from` → `to` hop.
    #[must_use]
    pub fn with_cost(mut self, from: &str, to: &str, cost: TravelCost) -> Self {
        self.costs.insert((from.to_owned(), to.to_owned()), cost);
        self
    }

    /// Requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.borrow().clone()
    }
}

impl TravelCostProvider for TableTravelCostProvider {
    fn travel_cost(&self, from: &Waypoint, to: &Waypoint) -> Result<TravelCost, TravelCostError> {
        let key = (from.title.clone(), to.title.clone());
        self.requests.borrow_mut().push(key.clone());
        self.costs
            .get(&key)
            .copied()
            .ok_or_else(|| TravelCostError::Unreachable {
                from: key.0,
                to: key.1,
            })
    }
}

/// `DirectionsProvider` producing a two-step straight-line route for every
/// leg, or failing for destinations listed as unroutable.
#[derive(Debug, Default)]
pub struct StraightLineDirections {
    unroutable: Vec<String>,
}

impl StraightLineDirections {
    /// Create a provider that routes every leg.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`DirectionsError::NoRoute`] for legs ending at `title`.
    #[must_use]
    pub fn without_route_to(mut self, title: &str) -> Self {
        self.unroutable.push(title.to_owned());
        self
    }
}

impl DirectionsProvider for StraightLineDirections {
    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RouteDirections, DirectionsError> {
        if self.unroutable.contains(&to.title) {
            return Err(DirectionsError::NoRoute {
                from: from.title.clone(),
                to: to.title.clone(),
            });
        }
        let steps = vec![
            RouteStep {
                maneuver: Maneuver {
                    kind: "depart".into(),
                    modifier: None,
                    instruction: format!("Leave {}", from.title),
                },
                distance: 1_200.0,
                duration: 90.0,
                name: String::new(),
            },
            RouteStep {
                maneuver: Maneuver {
                    kind: "arrive".into(),
                    modifier: None,
                    instruction: format!("Arrive at {}", to.title),
                },
                distance: 0.0,
                duration: 0.0,
                name: String::new(),
            },
        ];
        Ok(RouteDirections {
            geometry: LineString::from(vec![from.coord(), to.coord()]),
            steps,
            distance: 1_200.0,
            duration: 90.0,
            from: from.title.clone(),
            to: to.title.clone(),
        })
    }
}

/// A small Ilocos Norte catalogue covering several categories.
#[must_use]
pub fn sample_locations() -> Vec<Location> {
    vec![
        Location::new("Paoay Church", 18.0614, 120.5217, Category::Churches)
            .with_time_range("6:00 AM - 7:00 PM"),
        Location::new("Saud Beach", 18.6355, 120.8450, Category::Beaches)
            .with_time_range("Open 24 hours"),
        Location::new("Museo Ilocos Norte", 18.1964, 120.5932, Category::Museums)
            .with_time_range("9:00 AM - 5:00 PM"),
        Location::new("Kapurpurawan Rock Formation", 18.5667, 120.9167, Category::Nature)
            .with_time_range("6:00 AM - 6:00 PM"),
    ]
}
