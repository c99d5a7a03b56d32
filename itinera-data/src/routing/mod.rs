//! Mapbox-backed routing providers.
//!
//! [`MapboxMatrixClient`] implements [`itinera_core::TravelCostProvider`]
//! over the Matrix API, and [`MapboxDirectionsClient`] implements
//! [`itinera_core::DirectionsProvider`] over the Directions API. Both issue
//! one request per hop and block on it internally, so the core traits stay
//! synchronous.
//!
//! Access tokens are stripped from every logged URL and error message.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use itinera_data::routing::{MapboxConfig, MapboxDirectionsClient, MapboxProfile};
//!
//! let config = MapboxConfig::new("pk.your-token")
//!     .with_profile(MapboxProfile::Driving)
//!     .with_timeout(Duration::from_secs(10));
//! let directions = MapboxDirectionsClient::new(config)?;
//! # Ok::<(), itinera_data::routing::ProviderBuildError>(())
//! ```

mod config;
mod directions;
mod http;
mod mapbox;
mod matrix;

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, MapboxConfig, MapboxProfile, redact_token,
};
pub use directions::MapboxDirectionsClient;
pub use http::ProviderBuildError;
pub use matrix::MapboxMatrixClient;
