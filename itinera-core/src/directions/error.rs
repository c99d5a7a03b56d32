use thiserror::Error;

/// Errors from [`crate::directions::DirectionsProvider::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Redacted request URL.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The request failed before a response was received.
    #[error("network error calling {url}: {message}")]
    NetworkError {
        /// Redacted request URL.
        url: String,
        /// Underlying error description.
        message: String,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Redacted request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Underlying error description.
        message: String,
    },
    /// The service answered but reported a failure code other than a
    /// missing route.
    #[error("directions service returned {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `InvalidInput`.
        code: String,
        /// Service-supplied message, possibly empty.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse directions response: {message}")]
    ParseError {
        /// Description of the parse failure.
        message: String,
    },
    /// The service returned no route for the leg.
    #[error("no route from '{from}' to '{to}'")]
    NoRoute {
        /// Origin title.
        from: String,
        /// Destination title.
        to: String,
    },
}
