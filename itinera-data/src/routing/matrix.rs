//! `TravelCostProvider` backed by the Mapbox Matrix API.

use itinera_core::{TravelCost, TravelCostError, TravelCostProvider, Waypoint};

use super::config::MapboxConfig;
use super::http::{MapboxHttp, ProviderBuildError};
use super::mapbox::{MatrixResponse, cell};

const MATRIX_SERVICE: &str = "directions-matrix/v1";

/// Fetches single-hop driving costs from the Mapbox Matrix API.
///
/// Each call requests a two-coordinate matrix and reads the
/// source-to-destination cell, `[0][1]`, of both annotations.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the client blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime it uses that runtime's handle
/// with [`tokio::task::block_in_place`]. Inside a `current_thread` runtime it
/// falls back to its own runtime, which blocks the caller's executor.
///
/// # Example
///
/// ```no_run
/// use geo::Coord;
/// use itinera_core::{TravelCostProvider, Waypoint};
/// use itinera_data::routing::{MapboxConfig, MapboxMatrixClient};
///
/// let client = MapboxMatrixClient::new(MapboxConfig::new("pk.your-token"))?;
/// let from = Waypoint::new("Your Location (CCIS)", Coord { x: 120.545021, y: 18.059779 });
/// let to = Waypoint::new("Paoay Church", Coord { x: 120.5217, y: 18.0614 });
/// let cost = client.travel_cost(&from, &to)?;
/// println!("{} m, {} s", cost.distance, cost.duration);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct MapboxMatrixClient {
    http: MapboxHttp,
}

impl MapboxMatrixClient {
    /// Create a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(config: MapboxConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            http: MapboxHttp::new(config)?,
        })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &MapboxConfig {
        self.http.config()
    }

    fn matrix_url(&self, from: &Waypoint, to: &Waypoint) -> String {
        let coordinates = format!("{};{}", from.lon_lat(), to.lon_lat());
        self.http.config().endpoint(
            MATRIX_SERVICE,
            &coordinates,
            &[("annotations", "distance,duration")],
        )
    }

    async fn fetch(&self, from: &Waypoint, to: &Waypoint) -> Result<TravelCost, TravelCostError> {
        let response: MatrixResponse = self.http.get_json(&self.matrix_url(from, to)).await?;
        convert_response(response, from, to)
    }
}

fn convert_response(
    response: MatrixResponse,
    from: &Waypoint,
    to: &Waypoint,
) -> Result<TravelCost, TravelCostError> {
    if !response.is_ok() {
        return Err(TravelCostError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let (Some(distances), Some(durations)) = (response.distances, response.durations) else {
        return Err(TravelCostError::ParseError {
            message: "matrix response missing distances or durations".to_owned(),
        });
    };

    let usable = |value: f64| value.is_finite() && value >= 0.0;
    match (cell(&distances, 0, 1), cell(&durations, 0, 1)) {
        (Some(distance), Some(duration)) if usable(distance) && usable(duration) => {
            Ok(TravelCost::new(distance, duration))
        }
        _ => Err(TravelCostError::Unreachable {
            from: from.title.clone(),
            to: to.title.clone(),
        }),
    }
}

impl TravelCostProvider for MapboxMatrixClient {
    fn travel_cost(&self, from: &Waypoint, to: &Waypoint) -> Result<TravelCost, TravelCostError> {
        self.http.block_on(self.fetch(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hop() -> (Waypoint, Waypoint) {
        (
            Waypoint::new("Origin", Coord { x: 120.5, y: 18.0 }),
            Waypoint::new("Church", Coord { x: 120.6, y: 18.1 }),
        )
    }

    fn matrix(cell: Option<f64>) -> Option<Vec<Vec<Option<f64>>>> {
        Some(vec![vec![Some(0.0), cell], vec![Some(1.0), Some(0.0)]])
    }

    #[rstest]
    fn matrix_url_lists_both_coordinates(hop: (Waypoint, Waypoint)) {
        let client = MapboxMatrixClient::new(
            MapboxConfig::new("pk.test").with_base_url("http://mapbox.example.com"),
        )
        .expect("client should build");

        let url = client.matrix_url(&hop.0, &hop.1);

        assert_eq!(
            url,
            "http://mapbox.example.com/directions-matrix/v1/mapbox/driving/120.5,18;120.6,18.1?annotations=distance,duration&access_token=pk.test"
        );
    }

    #[rstest]
    fn invalid_base_url_is_rejected() {
        let err = MapboxMatrixClient::new(MapboxConfig::new("pk.test").with_base_url("not a url"))
            .expect_err("base URL should be rejected");
        assert!(matches!(err, ProviderBuildError::BaseUrl { .. }));
    }

    #[rstest]
    fn reads_source_to_destination_cell(hop: (Waypoint, Waypoint)) {
        let response = MatrixResponse {
            code: "Ok".to_owned(),
            message: None,
            distances: matrix(Some(1_520.5)),
            durations: matrix(Some(140.2)),
        };

        let cost = convert_response(response, &hop.0, &hop.1).expect("should convert");

        assert_eq!(cost, TravelCost::new(1_520.5, 140.2));
    }

    #[rstest]
    #[case(None, Some(140.2))]
    #[case(Some(1_520.5), None)]
    #[case(Some(-1.0), Some(140.2))]
    #[case(Some(f64::NAN), Some(140.2))]
    fn missing_or_invalid_cell_is_unreachable(
        hop: (Waypoint, Waypoint),
        #[case] distance: Option<f64>,
        #[case] duration: Option<f64>,
    ) {
        let response = MatrixResponse {
            code: "Ok".to_owned(),
            message: None,
            distances: matrix(distance),
            durations: matrix(duration),
        };

        let err = convert_response(response, &hop.0, &hop.1).expect_err("should fail");

        assert_eq!(
            err,
            TravelCostError::Unreachable {
                from: "Origin".to_owned(),
                to: "Church".to_owned(),
            }
        );
    }

    #[rstest]
    fn service_error_carries_code_and_message(hop: (Waypoint, Waypoint)) {
        let response = MatrixResponse {
            code: "InvalidInput".to_owned(),
            message: Some("Coordinate is invalid".to_owned()),
            distances: None,
            durations: None,
        };

        let err = convert_response(response, &hop.0, &hop.1).expect_err("should fail");

        assert_eq!(
            err,
            TravelCostError::ServiceError {
                code: "InvalidInput".to_owned(),
                message: "Coordinate is invalid".to_owned(),
            }
        );
    }

    #[rstest]
    fn missing_annotations_are_a_parse_error(hop: (Waypoint, Waypoint)) {
        let response = MatrixResponse {
            code: "Ok".to_owned(),
            message: None,
            distances: None,
            durations: matrix(Some(1.0)),
        };

        let err = convert_response(response, &hop.0, &hop.1).expect_err("should fail");

        assert!(matches!(err, TravelCostError::ParseError { .. }));
    }
}
