//! Station feed error types.

/// Errors from the station feed client.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check JCDECAUX_API_KEY")]
    Unauthorized,

    /// Feed returned an error status
    #[error("feed error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A station record could not be converted to a domain station
    #[error("bad record for station {station}: {message}")]
    BadRecord { station: u32, message: String },
}
