use thiserror::Error;

/// Errors from [`crate::travel_cost::TravelCostProvider::travel_cost`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelCostError {
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
    /// The service answered but reported a failure code.
    #[error("routing service returned {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `NoRoute` or `InvalidInput`.
        code: String,
        /// Service-supplied message, possibly empty.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Description of the parse failure.
        message: String,
    },
    /// The service found no route between the two waypoints.
    #[error("no route from '{from}' to '{to}'")]
    Unreachable {
        /// Origin title.
        from: String,
        /// Destination title.
        to: String,
    },
}
