//! Mapbox options shared by the routing-backed subcommands.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use itinera_core::{DirectionsProvider, TravelCostProvider};
use itinera_data::routing::{
    DEFAULT_BASE_URL, MapboxConfig, MapboxDirectionsClient, MapboxMatrixClient, MapboxProfile,
};

use crate::{
    ARG_MAPBOX_TOKEN, ARG_PROFILE, CliError, ENV_MAPBOX_TOKEN, ENV_PUBLIC_MAPBOX_TOKEN,
};

/// Resolves environment variables by name.
pub(crate) type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Read a non-blank variable from the process environment.
pub(crate) fn process_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Connection settings resolved from flags, config layers and fallbacks.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct MapboxSettings {
    pub(crate) token: String,
    pub(crate) base_url: String,
    pub(crate) profile: MapboxProfile,
}

impl fmt::Debug for MapboxSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapboxSettings")
            .field("token", &"REDACTED")
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .finish()
    }
}

impl MapboxSettings {
    /// Combine the merged option values with the token fallbacks.
    ///
    /// The token comes from the merged `mapbox_token` value first, then
    /// `MAPBOX_TOKEN`, then `NEXT_PUBLIC_MAPBOX_TOKEN`.
    pub(crate) fn resolve(
        token: Option<String>,
        base_url: Option<String>,
        profile: Option<&str>,
        lookup: EnvLookup<'_>,
    ) -> Result<Self, CliError> {
        let token = token
            .filter(|value| !value.trim().is_empty())
            .or_else(|| lookup(ENV_MAPBOX_TOKEN))
            .or_else(|| lookup(ENV_PUBLIC_MAPBOX_TOKEN))
            .ok_or(CliError::MissingArgument {
                field: ARG_MAPBOX_TOKEN,
                env: ENV_MAPBOX_TOKEN,
            })?;
        Ok(Self {
            token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            profile: parse_profile(profile)?,
        })
    }

    pub(crate) fn client_config(&self) -> MapboxConfig {
        MapboxConfig::new(self.token.clone())
            .with_base_url(self.base_url.clone())
            .with_profile(self.profile)
    }
}

fn parse_profile(raw: Option<&str>) -> Result<MapboxProfile, CliError> {
    raw.map_or(Ok(MapboxProfile::default()), |value| {
        MapboxProfile::from_str(value).map_err(|reason| CliError::InvalidArgument {
            field: ARG_PROFILE,
            value: value.to_owned(),
            reason,
        })
    })
}

/// Pause between builder requests, falling back to `default`.
pub(crate) fn request_delay(delay_ms: Option<u64>, default: Duration) -> Duration {
    delay_ms.map_or(default, Duration::from_millis)
}

/// Builds routing providers for the current invocation.
pub(crate) trait ProviderFactory {
    fn travel_costs(
        &self,
        settings: &MapboxSettings,
    ) -> Result<Box<dyn TravelCostProvider>, CliError>;

    fn directions(&self, settings: &MapboxSettings)
    -> Result<Box<dyn DirectionsProvider>, CliError>;
}

/// Talks to the Mapbox Matrix and Directions APIs.
pub(crate) struct MapboxProviderFactory;

impl ProviderFactory for MapboxProviderFactory {
    fn travel_costs(
        &self,
        settings: &MapboxSettings,
    ) -> Result<Box<dyn TravelCostProvider>, CliError> {
        let client = MapboxMatrixClient::new(settings.client_config()).map_err(|source| {
            CliError::BuildProvider {
                base_url: settings.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(client))
    }

    fn directions(
        &self,
        settings: &MapboxSettings,
    ) -> Result<Box<dyn DirectionsProvider>, CliError> {
        let client = MapboxDirectionsClient::new(settings.client_config()).map_err(|source| {
            CliError::BuildProvider {
                base_url: settings.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(client))
    }
}
