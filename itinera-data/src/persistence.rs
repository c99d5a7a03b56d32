//! JSON files for the catalogue and the precomputed tables.
//!
//! Files are written pretty-printed with two-space indentation, the layout
//! the map front end reads.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use itinera_core::{Catalogue, CatalogueError, DistanceGraph, Location, UserDistances};
use itinera_fs::{read_utf8_file, write_utf8_file};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised while loading or saving data files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Offending path.
        path: Utf8PathBuf,
        /// IO failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid JSON of the expected shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Offending path.
        path: Utf8PathBuf,
        /// JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// The catalogue parsed but violates a catalogue rule.
    #[error("invalid catalogue {path}: {source}")]
    Catalogue {
        /// Offending path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: CatalogueError,
    },
    /// The value could not be encoded.
    #[error("failed to encode {path}: {source}")]
    Encode {
        /// Target path.
        path: Utf8PathBuf,
        /// JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// The file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Target path.
        path: Utf8PathBuf,
        /// IO failure.
        #[source]
        source: io::Error,
    },
}

/// Load and validate `locations.json`.
///
/// # Errors
/// Fails when the file is unreadable, is not a JSON array of locations, or
/// repeats a title.
pub fn load_catalogue(path: &Utf8Path) -> Result<Catalogue, PersistenceError> {
    let locations: Vec<Location> = load_json(path)?;
    Catalogue::from_locations(locations).map_err(|source| PersistenceError::Catalogue {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `user-distances.json`.
///
/// # Errors
/// Fails when the file is unreadable or malformed.
pub fn load_user_distances(path: &Utf8Path) -> Result<UserDistances, PersistenceError> {
    load_json(path)
}

/// Load `distance-graph.json`.
///
/// # Errors
/// Fails when the file is unreadable or malformed.
pub fn load_distance_graph(path: &Utf8Path) -> Result<DistanceGraph, PersistenceError> {
    load_json(path)
}

/// Write `graph`, creating parent directories as needed.
///
/// # Errors
/// Fails when encoding or writing fails.
pub fn write_distance_graph(path: &Utf8Path, graph: &DistanceGraph) -> Result<(), PersistenceError> {
    write_json(path, graph)
}

/// Write `distances`, creating parent directories as needed.
///
/// # Errors
/// Fails when encoding or writing fails.
pub fn write_user_distances(
    path: &Utf8Path,
    distances: &UserDistances,
) -> Result<(), PersistenceError> {
    write_json(path, distances)
}

fn load_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, PersistenceError> {
    let text = read_utf8_file(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| PersistenceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Utf8Path, value: &T) -> Result<(), PersistenceError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|source| PersistenceError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    write_utf8_file(path, text).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_core::TravelCost;
    use itinera_core::user_distances::default_origin;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> (TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        (dir, root)
    }

    #[rstest]
    fn graph_round_trips_through_nested_path(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let path = root.join("data/out/distance-graph.json");
        let mut graph = DistanceGraph::new();
        graph.insert_edge("Paoay Church", "Saud Beach", TravelCost::new(72_000.0, 4_500.0));

        write_distance_graph(&path, &graph).expect("write graph");
        let loaded = load_distance_graph(&path).expect("load graph");

        assert_eq!(loaded, graph);
        let text = std::fs::read_to_string(&path).expect("read raw");
        assert!(text.starts_with("{\n  \"Paoay Church\": {\n    \"Saud Beach\""), "{text}");
    }

    #[rstest]
    fn user_distances_use_camel_case_keys(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let path = root.join("user-distances.json");
        let mut distances = UserDistances::new(default_origin());
        distances.insert("Paoay Church", TravelCost::new(2_100.0, 300.0));

        write_user_distances(&path, &distances).expect("write distances");

        let text = std::fs::read_to_string(&path).expect("read raw");
        assert!(text.contains("\"userLocation\""));
        assert_eq!(load_user_distances(&path).expect("load"), distances);
    }

    #[rstest]
    fn catalogue_with_duplicate_titles_is_rejected(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let path = root.join("locations.json");
        let entry = r#"{"title": "Paoay Church", "latitude": 18.06, "longitude": 120.52, "type": "churches"}"#;
        std::fs::write(&path, format!("[{entry}, {entry}]")).expect("write fixture");

        let err = load_catalogue(&path).expect_err("duplicate titles");

        assert!(matches!(err, PersistenceError::Catalogue { .. }));
        assert!(err.to_string().contains("locations.json"));
    }

    #[rstest]
    fn malformed_json_names_the_file(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let path = root.join("distance-graph.json");
        std::fs::write(&path, "{ not json").expect("write fixture");

        let err = load_distance_graph(&path).expect_err("malformed");

        assert!(matches!(err, PersistenceError::Parse { .. }));
        assert!(err.to_string().contains("distance-graph.json"));
    }

    #[rstest]
    fn missing_file_is_a_read_error(scratch: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = scratch;
        let err = load_catalogue(&root.join("absent.json")).expect_err("missing");
        assert!(matches!(err, PersistenceError::Read { .. }));
    }
}
