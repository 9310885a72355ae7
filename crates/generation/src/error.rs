/// Errors from the content generation layer.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The generation service returned a non-2xx status code.
    #[error("Generation API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered but produced no message content.
    #[error("Generation API returned no content")]
    EmptyResponse,

    /// The reply could not be turned into slides.
    #[error("Malformed generation output: {0}")]
    Malformed(String),
}
