//! Errors produced by the model client and surfaced to the views.

/// Failure of a single model operation.
///
/// Every variant is scoped to one request; none of them is fatal to the
/// application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudioError {
    /// No API key could be resolved when the operation started.
    #[error("API key is missing: set {var} in your environment")]
    Configuration { var: String },

    /// The backend produced no text and stopped for a reason other than `STOP`.
    #[error("generation failed: {finish_reason}")]
    Generation { finish_reason: String },

    /// The image model answered without any inline image payload.
    #[error("no image data received from model")]
    NoImage,

    /// The HTTP request could not be completed.
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("API error: status {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body did not decode.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The returned image could not be decoded for display.
    #[error("image decode failed: {0}")]
    ImageDecode(String),
}

impl From<reqwest::Error> for StudioError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
