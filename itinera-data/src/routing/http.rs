//! Blocking bridge over an async `reqwest` client.
//!
//! The provider traits in `itinera-core` are synchronous. [`MapboxHttp`]
//! owns a current-thread Tokio runtime and blocks on it, or borrows the
//! caller's runtime when already running inside a multi-threaded one.

use std::future::Future;

use itinera_core::{DirectionsError, TravelCostError};
use log::debug;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::config::{MapboxConfig, redact_token};

/// Error type for Mapbox client construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The configured base URL does not parse.
    BaseUrl {
        /// The rejected base URL.
        base_url: String,
        /// Parser failure.
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BaseUrl { base_url, source } => {
                write!(f, "invalid routing base URL '{base_url}': {source}")
            }
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BaseUrl { source, .. } => Some(source),
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Transport failure, converted into the provider-specific error by each
/// client. URLs are already redacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequestError {
    Timeout { url: String, timeout_secs: u64 },
    Network { url: String, message: String },
    Http { url: String, status: u16, message: String },
    Service { code: String, message: String },
    Parse { message: String },
}

/// The `{code, message}` pair Mapbox sends alongside a non-success status.
#[derive(Debug, Deserialize)]
struct ServiceStatus {
    code: Option<String>,
    message: Option<String>,
}

impl From<RequestError> for TravelCostError {
    fn from(error: RequestError) -> Self {
        match error {
            RequestError::Timeout { url, timeout_secs } => Self::Timeout { url, timeout_secs },
            RequestError::Network { url, message } => Self::NetworkError { url, message },
            RequestError::Http {
                url,
                status,
                message,
            } => Self::HttpError {
                url,
                status,
                message,
            },
            RequestError::Service { code, message } => Self::ServiceError { code, message },
            RequestError::Parse { message } => Self::ParseError { message },
        }
    }
}

impl From<RequestError> for DirectionsError {
    fn from(error: RequestError) -> Self {
        match error {
            RequestError::Timeout { url, timeout_secs } => Self::Timeout { url, timeout_secs },
            RequestError::Network { url, message } => Self::NetworkError { url, message },
            RequestError::Http {
                url,
                status,
                message,
            } => Self::HttpError {
                url,
                status,
                message,
            },
            RequestError::Service { code, message } => Self::ServiceError { code, message },
            RequestError::Parse { message } => Self::ParseError { message },
        }
    }
}

/// HTTP client, configuration and runtime shared by both Mapbox clients.
pub(crate) struct MapboxHttp {
    client: Client,
    config: MapboxConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for MapboxHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapboxHttp")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl MapboxHttp {
    pub(crate) fn new(config: MapboxConfig) -> Result<Self, ProviderBuildError> {
        Url::parse(&config.base_url).map_err(|source| ProviderBuildError::BaseUrl {
            base_url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    pub(crate) const fn config(&self) -> &MapboxConfig {
        &self.config
    }

    /// Run `future` to completion from synchronous code.
    ///
    /// Inside a `current_thread` runtime this falls back to the owned
    /// runtime, which blocks the caller's runtime for the duration.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    /// GET `url` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RequestError> {
        let redacted = redact_token(url);
        debug!("GET {redacted}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.request_error(err, &redacted))?;
        if !response.status().is_success() {
            return Err(self.status_error(response, redacted).await);
        }
        response.json().await.map_err(|err| RequestError::Parse {
            message: err.without_url().to_string(),
        })
    }

    /// Classify a non-success response. A body carrying a Mapbox `code`
    /// becomes [`RequestError::Service`]; anything else stays an HTTP error,
    /// using the body's `message` when there is one.
    async fn status_error(&self, response: Response, url: String) -> RequestError {
        let status = response.status();
        let fallback = response
            .error_for_status_ref()
            .err()
            .map(|err| err.without_url().to_string())
            .unwrap_or_else(|| status.to_string());
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => return self.request_error(err, &url),
        };
        let parsed = serde_json::from_slice::<ServiceStatus>(&body).ok();
        match parsed {
            Some(ServiceStatus {
                code: Some(code),
                message,
            }) => RequestError::Service {
                code,
                message: message.unwrap_or_default(),
            },
            other => RequestError::Http {
                url,
                status: status.as_u16(),
                message: other.and_then(|parsed| parsed.message).unwrap_or(fallback),
            },
        }
    }

    /// Convert a reqwest error, dropping the embedded URL so the token
    /// never reaches the message.
    fn request_error(&self, error: reqwest::Error, redacted_url: &str) -> RequestError {
        let url = redacted_url.to_owned();
        if error.is_timeout() {
            return RequestError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        let status = error.status();
        let message = error.without_url().to_string();
        match status {
            Some(status) => RequestError::Http {
                url,
                status: status.as_u16(),
                message,
            },
            None => RequestError::Network { url, message },
        }
    }
}
