//! All-pairs travel costs between catalogue locations.
//!
//! The graph serialises as a nested JSON object keyed by origin title, then
//! destination title. Every catalogue title has an entry, possibly empty;
//! pairs whose routing request failed are simply absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::TravelCost;

/// Directed, weighted graph of precomputed travel costs.
///
/// # Examples
/// ```
/// use itinera_core::{DistanceGraph, TravelCost};
///
/// let mut graph = DistanceGraph::new();
/// graph.insert_node("Paoay Church");
/// graph.insert_edge("Paoay Church", "Saud Beach", TravelCost::new(62_000.0, 4_200.0));
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// assert!(graph.edge("Saud Beach", "Paoay Church").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceGraph {
    adjacency: BTreeMap<String, BTreeMap<String, TravelCost>>,
}

impl DistanceGraph {
    /// Construct an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `title` has an adjacency entry.
    pub fn insert_node(&mut self, title: impl Into<String>) {
        self.adjacency.entry(title.into()).or_default();
    }

    /// Record the cost of travelling from `from` to `to`, replacing any
    /// earlier value. Both endpoints become nodes.
    pub fn insert_edge(&mut self, from: impl Into<String>, to: impl Into<String>, cost: TravelCost) {
        let to = to.into();
        self.adjacency.entry(to.clone()).or_default();
        self.adjacency.entry(from.into()).or_default().insert(to, cost);
    }

    /// Cost of the `from` → `to` edge, if it was computed.
    #[must_use]
    pub fn edge(&self, from: &str, to: &str) -> Option<&TravelCost> {
        self.adjacency.get(from).and_then(|row| row.get(to))
    }

    /// Outgoing edges of `from`, ordered by destination title.
    pub fn neighbours(&self, from: &str) -> impl Iterator<Item = (&str, &TravelCost)> {
        self.adjacency
            .get(from)
            .into_iter()
            .flat_map(|row| row.iter().map(|(to, cost)| (to.as_str(), cost)))
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of stored edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }
}
