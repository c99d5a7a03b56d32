//! Mapbox Matrix and Directions API response types.
//!
//! Only the fields the clients read are modelled; everything else in the
//! payload is ignored.
//!
//! See: <https://docs.mapbox.com/api/navigation/matrix/> and
//! <https://docs.mapbox.com/api/navigation/directions/>

use serde::Deserialize;

const CODE_OK: &str = "Ok";

/// Matrix API response.
#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    /// Status code; `"Ok"` on success, e.g. `"InvalidInput"` otherwise.
    pub code: String,

    /// Error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// `distances[i][j]` is metres from source `i` to destination `j`, or
    /// `None` when no route exists.
    pub distances: Option<Vec<Vec<Option<f64>>>>,

    /// `durations[i][j]` is seconds from source `i` to destination `j`, or
    /// `None` when no route exists.
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl MatrixResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

/// Look up `matrix[row][column]`, flattening a missing row or cell and a
/// `null` value into `None`.
pub(crate) fn cell(matrix: &[Vec<Option<f64>>], row: usize, column: usize) -> Option<f64> {
    matrix.get(row)?.get(column).copied().flatten()
}

/// Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code; `"Ok"` on success, `"NoRoute"` when nothing connects the
    /// waypoints.
    pub code: String,

    /// Error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

/// One candidate route.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// GeoJSON line in `[lon, lat]` order.
    pub geometry: LineGeometry,
    /// Metres.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
    /// One leg per consecutive waypoint pair.
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// Positions as `[lon, lat]`.
    pub coordinates: Vec<[f64; 2]>,
}

/// Route between two consecutive waypoints.
#[derive(Debug, Deserialize)]
pub struct RouteLeg {
    /// Turn-by-turn steps, present when `steps=true` was requested.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One turn-by-turn step.
#[derive(Debug, Deserialize)]
pub struct Step {
    /// Maneuver that begins the step.
    pub maneuver: StepManeuver,
    /// Metres.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
    /// Road name.
    #[serde(default)]
    pub name: String,
}

/// Maneuver of a [`Step`].
#[derive(Debug, Deserialize)]
pub struct StepManeuver {
    /// e.g. `turn`, `depart`, `arrive`.
    #[serde(rename = "type")]
    pub kind: String,
    /// e.g. `left`, `slight right`.
    pub modifier: Option<String>,
    /// Human-readable instruction.
    #[serde(default)]
    pub instruction: String,
}
