//! `DirectionsProvider` backed by the Mapbox Directions API.

use geo::{Coord, LineString};
use itinera_core::{
    DirectionsError, DirectionsProvider, Maneuver, RouteDirections, RouteStep, Waypoint,
};

use super::config::MapboxConfig;
use super::http::{MapboxHttp, ProviderBuildError, RequestError};
use super::mapbox::{DirectionsResponse, Step};

const DIRECTIONS_SERVICE: &str = "directions/v5";
const NO_ROUTE_CODES: [&str; 2] = ["NoRoute", "NoSegment"];

/// Fetches turn-by-turn directions for one leg.
///
/// Requests GeoJSON geometry with steps, banner and voice instructions, and
/// keeps the first route and its first leg. Shares the runtime behaviour of
/// [`super::MapboxMatrixClient`].
#[derive(Debug)]
pub struct MapboxDirectionsClient {
    http: MapboxHttp,
}

impl MapboxDirectionsClient {
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

    fn directions_url(&self, from: &Waypoint, to: &Waypoint) -> String {
        let coordinates = format!("{};{}", from.lon_lat(), to.lon_lat());
        self.http.config().endpoint(
            DIRECTIONS_SERVICE,
            &coordinates,
            &[
                ("geometries", "geojson"),
                ("steps", "true"),
                ("banner_instructions", "true"),
                ("voice_instructions", "true"),
            ],
        )
    }

    async fn fetch(
        &self,
        from: &Waypoint,
        to: &Waypoint,
    ) -> Result<RouteDirections, DirectionsError> {
        let response: DirectionsResponse = self
            .http
            .get_json(&self.directions_url(from, to))
            .await
            .map_err(|err| match err {
                RequestError::Service { ref code, .. } if NO_ROUTE_CODES.contains(&code.as_str()) => {
                    DirectionsError::NoRoute {
                        from: from.title.clone(),
                        to: to.title.clone(),
                    }
                }
                other => other.into(),
            })?;
        convert_response(response, from, to)
    }
}

fn convert_response(
    response: DirectionsResponse,
    from: &Waypoint,
    to: &Waypoint,
) -> Result<RouteDirections, DirectionsError> {
    let no_route = || DirectionsError::NoRoute {
        from: from.title.clone(),
        to: to.title.clone(),
    };

    if !response.is_ok() {
        if NO_ROUTE_CODES.contains(&response.code.as_str()) {
            return Err(no_route());
        }
        return Err(DirectionsError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response.routes.into_iter().next().ok_or_else(no_route)?;
    let steps = route
        .legs
        .into_iter()
        .next()
        .map(|leg| leg.steps.into_iter().map(convert_step).collect())
        .unwrap_or_default();
    let geometry = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[x, y]| Coord { x, y })
        .collect::<LineString<f64>>();

    Ok(RouteDirections {
        geometry,
        steps,
        distance: route.distance,
        duration: route.duration,
        from: from.title.clone(),
        to: to.title.clone(),
    })
}

fn convert_step(step: Step) -> RouteStep {
    RouteStep {
        maneuver: Maneuver {
            kind: step.maneuver.kind,
            modifier: step.maneuver.modifier,
            instruction: step.maneuver.instruction,
        },
        distance: step.distance,
        duration: step.duration,
        name: step.name,
    }
}

impl DirectionsProvider for MapboxDirectionsClient {
    fn route(&self, from: &Waypoint, to: &Waypoint) -> Result<RouteDirections, DirectionsError> {
        self.http.block_on(self.fetch(from, to))
    }
}
