//! Weather feed error types.

/// Errors from the weather feed client.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check OPENWEATHER_API_KEY")]
    Unauthorized,

    /// Feed returned an error status
    #[error("weather API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response was parseable but missing an expected block
    #[error("weather response missing {what}")]
    Missing { what: &'static str },
}
