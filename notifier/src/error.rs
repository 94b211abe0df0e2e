use thiserror::Error;

/// Failure talking to an external HTTP collaborator.
///
/// Always recoverable at the cycle level: callers log the failing target
/// and treat the call as having produced no data. Nothing here is allowed
/// to take down the process.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the response never arrived
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the JSON shape we expect
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
