//! Connection settings shared by the Mapbox clients.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

/// Default Mapbox API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Default user agent for Mapbox requests.
pub const DEFAULT_USER_AGENT: &str = "itinera-routing/0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const REDACTED: &str = "REDACTED";

/// Routing profile appended to Mapbox request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapboxProfile {
    /// Car routing without live traffic.
    #[default]
    Driving,
    /// Car routing with live traffic.
    DrivingTraffic,
    /// Pedestrian routing.
    Walking,
    /// Bicycle routing.
    Cycling,
}

impl MapboxProfile {
    /// Path segment used by the Mapbox APIs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::DrivingTraffic => "driving-traffic",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for MapboxProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapboxProfile {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(Self::Driving),
            "driving-traffic" => Ok(Self::DrivingTraffic),
            "walking" => Ok(Self::Walking),
            "cycling" => Ok(Self::Cycling),
            other => Err(format!(
                "unknown routing profile '{other}'; expected driving, driving-traffic, walking or cycling"
            )),
        }
    }
}

/// Configuration for [`super::MapboxMatrixClient`] and
/// [`super::MapboxDirectionsClient`].
///
/// `Debug` output never includes the access token.
#[derive(Clone)]
pub struct MapboxConfig {
    /// API origin, e.g. `https://api.mapbox.com`.
    pub base_url: String,
    /// Mapbox access token sent as the `access_token` query parameter.
    pub access_token: String,
    /// Routing profile.
    pub profile: MapboxProfile,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl fmt::Debug for MapboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapboxConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &REDACTED)
            .field("profile", &self.profile)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl MapboxConfig {
    /// Create a configuration for the public Mapbox API.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            access_token: access_token.into(),
            profile: MapboxProfile::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Point the clients at another origin, such as a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub const fn with_profile(mut self, profile: MapboxProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// `{base}/{service}/mapbox/{profile}/{coordinates}` with the access
    /// token and `params` in the query string.
    pub(crate) fn endpoint(&self, service: &str, coordinates: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}/{service}/mapbox/{}/{coordinates}?",
            self.base_url.trim_end_matches('/'),
            self.profile
        );
        for (key, value) in params {
            url.push_str(key);
            url.push('=');
            url.push_str(value);
            url.push('&');
        }
        url.push_str("access_token=");
        url.push_str(&self.access_token);
        url
    }
}

/// Replace the `access_token` query value with a placeholder.
///
/// Input that does not parse as a URL is cut at the token parameter.
///
/// # Examples
/// ```
/// use itinera_data::routing::redact_token;
///
/// let url = "https://api.mapbox.com/directions/v5/mapbox/driving/1,2;3,4?steps=true&access_token=pk.secret";
/// let redacted = redact_token(url);
/// assert!(!redacted.contains("pk.secret"));
/// assert!(redacted.ends_with("access_token=REDACTED"));
/// ```
#[must_use]
pub fn redact_token(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return match raw.split_once("access_token=") {
            Some((head, _)) => format!("{head}access_token={REDACTED}"),
            None => raw.to_owned(),
        };
    };
    if url.query().is_none() {
        return url.into();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "access_token" {
                REDACTED.to_owned()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.into()
}
