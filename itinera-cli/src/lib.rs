//! Command-line interface for Itinera's offline builders and tour planner.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use itinera_core::Catalogue;
use itinera_data::load_catalogue;

mod error;
mod graph;
mod mapbox;
mod places;
mod tour;
mod user_distances;

pub use error::CliError;

use graph::{GraphArgs, run_graph};
use places::{PlacesArgs, run_places};
use tour::{TourArgs, run_tour};
use user_distances::{UserDistancesArgs, run_user_distances};

pub(crate) const ARG_LOCATIONS: &str = "locations";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_USER_DISTANCES: &str = "user-distances";
pub(crate) const ARG_MAPBOX_TOKEN: &str = "mapbox-token";
pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_PROFILE: &str = "profile";
pub(crate) const ARG_DELAY_MS: &str = "delay-ms";
pub(crate) const ARG_ORIGIN_TITLE: &str = "origin-title";
pub(crate) const ARG_ORIGIN_LAT: &str = "origin-lat";
pub(crate) const ARG_ORIGIN_LON: &str = "origin-lon";
pub(crate) const ARG_INTERESTS: &str = "interests";
pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ARG_AT: &str = "at";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_NO_DIRECTIONS: &str = "no-directions";

/// Primary token variable consulted when `--mapbox-token` is absent.
pub(crate) const ENV_MAPBOX_TOKEN: &str = "MAPBOX_TOKEN";
/// Token variable shared with the map front end.
pub(crate) const ENV_PUBLIC_MAPBOX_TOKEN: &str = "NEXT_PUBLIC_MAPBOX_TOKEN";

pub(crate) const DEFAULT_LOCATIONS: &str = "data/locations.json";
pub(crate) const DEFAULT_DISTANCE_GRAPH: &str = "data/distance-graph.json";
pub(crate) const DEFAULT_USER_DISTANCES: &str = "data/user-distances.json";

/// Run the Itinera CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Graph(args) => run_graph(args),
        Command::UserDistances(args) => run_user_distances(args),
        Command::Places(args) => run_places(args),
        Command::Tour(args) => run_tour(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "itinera",
    about = "Precompute travel costs and plan closest-first tours",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the all-pairs distance graph between catalogue locations.
    Graph(GraphArgs),
    /// Build the table of distances from the user origin.
    UserDistances(UserDistancesArgs),
    /// List places matching the selected interests, open ones first.
    Places(PlacesArgs),
    /// Walk a closest-first tour with turn-by-turn directions.
    Tour(TourArgs),
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match itinera_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if path.exists() => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load the catalogue that derived tables are built from.
///
/// An empty catalogue is rejected before any request is made or any output
/// file is touched.
pub(crate) fn load_source_catalogue(path: &Utf8Path) -> Result<Catalogue, CliError> {
    require_existing(path, ARG_LOCATIONS)?;
    let catalogue = load_catalogue(path)?;
    if catalogue.is_empty() {
        return Err(CliError::EmptyCatalogue {
            path: path.to_path_buf(),
        });
    }
    Ok(catalogue)
}

#[cfg(test)]
mod tests;
