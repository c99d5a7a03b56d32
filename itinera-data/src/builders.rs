//! Offline builders for the precomputed travel-cost tables.
//!
//! Both builders issue one provider request per hop, sequentially, pausing
//! between requests to stay under the routing service's rate limit. A
//! failed hop is logged and left out of the table; it never aborts the run.

use std::thread;
use std::time::Duration;

use itinera_core::{
    Catalogue, DistanceGraph, TravelCost, TravelCostProvider, UserDistances, Waypoint,
    format_distance_km,
};
use log::{info, warn};

/// Pause after each distance-graph request.
pub const DEFAULT_GRAPH_DELAY: Duration = Duration::from_millis(100);

/// Pause after each user-distance request.
pub const DEFAULT_USER_DISTANCE_DELAY: Duration = Duration::from_millis(150);

/// Number of pairs between distance-graph progress lines.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 50;

/// Pacing and reporting options for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Sleep after every request.
    pub delay: Duration,
    /// Log progress every this many requests; `0` disables interim lines.
    pub progress_interval: usize,
}

impl BuildOptions {
    /// Defaults for [`build_distance_graph`].
    #[must_use]
    pub const fn distance_graph() -> Self {
        Self {
            delay: DEFAULT_GRAPH_DELAY,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Defaults for [`build_user_distances`].
    #[must_use]
    pub const fn user_distances() -> Self {
        Self {
            delay: DEFAULT_USER_DISTANCE_DELAY,
            progress_interval: 0,
        }
    }

    /// Override the delay.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Outcome counts for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// Requests issued.
    pub attempted: usize,
    /// Requests that produced a stored entry.
    pub succeeded: usize,
    /// Requests that failed and were skipped.
    pub failed: usize,
}

impl BuildReport {
    fn record(&mut self, ok: bool) {
        self.attempted += 1;
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Compute costs for every ordered pair of distinct catalogue entries.
///
/// Pairs run row-major in catalogue order, so a catalogue of `n` locations
/// issues `n * (n - 1)` requests. Every location appears as a node even when
/// all of its outgoing requests fail.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use itinera_core::test_support::{FixedTravelCostProvider, sample_locations};
/// use itinera_core::{Catalogue, TravelCost};
/// use itinera_data::builders::{BuildOptions, build_distance_graph};
///
/// let catalogue = Catalogue::from_locations(sample_locations())?;
/// let provider = FixedTravelCostProvider::new(TravelCost::new(1_000.0, 60.0));
/// let options = BuildOptions::distance_graph().with_delay(Duration::ZERO);
///
/// let (graph, report) = build_distance_graph(&catalogue, &provider, &options);
/// assert_eq!(report.attempted, 12);
/// assert_eq!(graph.edge_count(), 12);
/// # Ok::<(), itinera_core::CatalogueError>(())
/// ```
pub fn build_distance_graph<P>(
    catalogue: &Catalogue,
    provider: &P,
    options: &BuildOptions,
) -> (DistanceGraph, BuildReport)
where
    P: TravelCostProvider + ?Sized,
{
    let mut graph = DistanceGraph::new();
    let mut report = BuildReport::default();
    for location in catalogue {
        graph.insert_node(location.title.clone());
    }

    let count = catalogue.len();
    let total = count * count.saturating_sub(1);
    info!("computing {total} travel costs between {count} locations");

    for (i, from) in catalogue.iter().enumerate() {
        let origin = from.waypoint();
        for (j, to) in catalogue.iter().enumerate() {
            if i == j {
                continue;
            }
            match provider.travel_cost(&origin, &to.waypoint()) {
                Ok(cost) => {
                    graph.insert_edge(&from.title, &to.title, cost);
                    report.record(true);
                }
                Err(err) => {
                    warn!("skipping {} -> {}: {err}", from.title, to.title);
                    report.record(false);
                }
            }
            log_progress(report.attempted, total, options.progress_interval);
            pause(options.delay);
        }
    }

    info!(
        "distance graph complete: {} nodes, {} edges, {} failed",
        graph.node_count(),
        graph.edge_count(),
        report.failed
    );
    (graph, report)
}

/// Compute the cost from `origin` to every catalogue entry.
///
/// Each outcome is logged: successes at `info` with the distance and time,
/// failures at `warn`.
pub fn build_user_distances<P>(
    origin: &Waypoint,
    catalogue: &Catalogue,
    provider: &P,
    options: &BuildOptions,
) -> (UserDistances, BuildReport)
where
    P: TravelCostProvider + ?Sized,
{
    let mut distances = UserDistances::new(origin.clone());
    let mut report = BuildReport::default();
    info!(
        "computing travel costs from {} ({}, {}) to {} destinations",
        origin.title,
        origin.latitude,
        origin.longitude,
        catalogue.len()
    );

    for location in catalogue {
        match provider.travel_cost(origin, &location.waypoint()) {
            Ok(cost) => {
                info!("{}: {}", location.title, cost_label(&cost));
                distances.insert(location.title.clone(), cost);
                report.record(true);
            }
            Err(err) => {
                warn!("{}: failed to calculate: {err}", location.title);
                report.record(false);
            }
        }
        log_progress(report.attempted, catalogue.len(), options.progress_interval);
        pause(options.delay);
    }

    info!(
        "calculated {} of {} distances",
        report.succeeded, report.attempted
    );
    (distances, report)
}

/// Numbered lines for the `limit` closest destinations, nearest first.
///
/// # Examples
/// ```
/// use itinera_core::{TravelCost, UserDistances};
/// use itinera_core::user_distances::default_origin;
/// use itinera_data::builders::summarise_closest;
///
/// let mut table = UserDistances::new(default_origin());
/// table.insert("Paoay Church", TravelCost::new(2_100.0, 300.0));
/// assert_eq!(summarise_closest(&table, 5), ["1. Paoay Church: 2.10 km (5 min)"]);
/// ```
#[must_use]
pub fn summarise_closest(distances: &UserDistances, limit: usize) -> Vec<String> {
    distances
        .closest(limit)
        .into_iter()
        .enumerate()
        .map(|(index, (title, cost))| format!("{}. {title}: {}", index + 1, cost_label(cost)))
        .collect()
}

/// Up to `limit` edges leaving `from`, in catalogue order, as
/// `from → to: <km> (<min>)` lines.
#[must_use]
pub fn summarise_edges(
    graph: &DistanceGraph,
    catalogue: &Catalogue,
    from: &str,
    limit: usize,
) -> Vec<String> {
    catalogue
        .iter()
        .filter_map(|to| Some((&to.title, graph.edge(from, &to.title)?)))
        .take(limit)
        .map(|(to, cost)| format!("{from} → {to}: {}", cost_label(cost)))
        .collect()
}

fn cost_label(cost: &TravelCost) -> String {
    format!(
        "{} ({:.0} min)",
        format_distance_km(cost.distance),
        cost.duration / 60.0
    )
}

fn log_progress(completed: usize, total: usize, interval: usize) {
    let on_interval = interval != 0 && completed % interval == 0;
    if total == 0 || !(on_interval || completed == total) {
        return;
    }
    let percent = completed as f64 / total as f64 * 100.0;
    info!("progress: {completed}/{total} ({percent:.1}%)");
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_core::test_support::{TableTravelCostProvider, sample_locations};
    use itinera_core::user_distances::default_origin;
    use itinera_core::{Category, Location};
    use rstest::{fixture, rstest};

    fn instant(options: BuildOptions) -> BuildOptions {
        options.with_delay(Duration::ZERO)
    }

    #[fixture]
    fn trio() -> Catalogue {
        let locations = ["A", "B", "C"]
            .into_iter()
            .map(|title| Location::new(title, 18.0, 120.5, Category::Landmarks))
            .collect();
        Catalogue::from_locations(locations).expect("unique titles")
    }

    #[rstest]
    fn graph_requests_every_ordered_pair_row_major(trio: Catalogue) {
        let provider = TableTravelCostProvider::new();

        let (_, report) = build_distance_graph(
            &trio,
            &provider,
            &instant(BuildOptions::distance_graph()),
        );

        let order: Vec<(String, String)> = provider.requests();
        let expected: Vec<(String, String)> = [
            ("A", "B"),
            ("A", "C"),
            ("B", "A"),
            ("B", "C"),
            ("C", "A"),
            ("C", "B"),
        ]
        .into_iter()
        .map(|(a, b)| (a.to_owned(), b.to_owned()))
        .collect();
        assert_eq!(order, expected);
        assert_eq!(report.attempted, 6);
    }

    #[rstest]
    fn graph_omits_failed_pairs_but_keeps_nodes(trio: Catalogue) {
        let provider = TableTravelCostProvider::new()
            .with_cost("A", "B", TravelCost::new(100.0, 10.0))
            .with_cost("B", "A", TravelCost::new(110.0, 11.0));

        let (graph, report) = build_distance_graph(
            &trio,
            &provider,
            &instant(BuildOptions::distance_graph()),
        );

        assert_eq!(
            report,
            BuildReport {
                attempted: 6,
                succeeded: 2,
                failed: 4
            }
        );
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge("A", "B"), Some(&TravelCost::new(100.0, 10.0)));
        assert!(graph.edge("A", "C").is_none());
        assert_eq!(graph.neighbours("C").count(), 0);
    }

    #[rstest]
    fn single_location_issues_no_requests() {
        let catalogue = Catalogue::from_locations(vec![Location::new(
            "Solo",
            18.0,
            120.5,
            Category::Beaches,
        )])
        .expect("unique titles");
        let provider = TableTravelCostProvider::new();

        let (graph, report) = build_distance_graph(
            &catalogue,
            &provider,
            &instant(BuildOptions::distance_graph()),
        );

        assert_eq!(report, BuildReport::default());
        assert_eq!(graph.node_count(), 1);
        assert!(provider.requests().is_empty());
    }

    #[rstest]
    fn user_distances_skip_failures() {
        let catalogue = Catalogue::from_locations(sample_locations()).expect("unique titles");
        let origin = default_origin();
        let provider = TableTravelCostProvider::new()
            .with_cost(&origin.title, "Paoay Church", TravelCost::new(2_100.0, 300.0))
            .with_cost(&origin.title, "Saud Beach", TravelCost::new(74_900.0, 4_800.0));

        let (distances, report) = build_user_distances(
            &origin,
            &catalogue,
            &provider,
            &instant(BuildOptions::user_distances()),
        );

        assert_eq!(report.attempted, 4);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(distances.origin(), &origin);
        assert!(distances.distance_to("Museo Ilocos Norte").is_none());
        assert_eq!(
            summarise_closest(&distances, 5),
            [
                "1. Paoay Church: 2.10 km (5 min)",
                "2. Saud Beach: 74.90 km (80 min)"
            ]
        );
    }

    #[rstest]
    fn edge_summary_respects_limit(trio: Catalogue) {
        let provider = TableTravelCostProvider::new()
            .with_cost("A", "B", TravelCost::new(1_000.0, 60.0))
            .with_cost("A", "C", TravelCost::new(2_000.0, 120.0));
        let (graph, _) = build_distance_graph(
            &trio,
            &provider,
            &instant(BuildOptions::distance_graph()),
        );

        assert_eq!(
            summarise_edges(&graph, &trio, "A", 1),
            ["A → B: 1.00 km (1 min)"]
        );
        assert!(summarise_edges(&graph, &trio, "missing", 3).is_empty());
    }

    #[test]
    fn edge_summary_follows_catalogue_order() {
        let catalogue = Catalogue::from_locations(
            ["Start", "Zambales Cove", "Bangui Windmills", "Laoag Cathedral"]
                .into_iter()
                .map(|title| Location::new(title, 18.0, 120.5, Category::Landmarks))
                .collect(),
        )
        .expect("unique titles");
        let provider = TableTravelCostProvider::new()
            .with_cost("Start", "Zambales Cove", TravelCost::new(3_000.0, 180.0))
            .with_cost("Start", "Bangui Windmills", TravelCost::new(1_000.0, 60.0))
            .with_cost("Start", "Laoag Cathedral", TravelCost::new(2_000.0, 120.0));
        let (graph, _) = build_distance_graph(
            &catalogue,
            &provider,
            &instant(BuildOptions::distance_graph()),
        );

        assert_eq!(
            summarise_edges(&graph, &catalogue, "Start", 2),
            [
                "Start → Zambales Cove: 3.00 km (3 min)",
                "Start → Bangui Windmills: 1.00 km (1 min)"
            ]
        );
    }

    #[test]
    fn default_delays() {
        assert_eq!(BuildOptions::distance_graph().delay, Duration::from_millis(100));
        assert_eq!(BuildOptions::user_distances().delay, Duration::from_millis(150));
    }
}
