//! Generative model access.
//!
//! Everything that talks to a model goes through [`GenerativeBackend`], so the
//! campaign pipeline can run against [`GeminiClient`] in production and a stub
//! in tests.

use async_trait::async_trait;

mod gemini;
#[cfg(test)]
pub(crate) mod stub;
pub mod types;

pub use gemini::GeminiClient;
pub use types::{InlineData, Part};

/// Errors raised by a model call.
#[derive(Debug)]
pub enum GenAiError {
    /// No API key was configured at startup.
    MissingApiKey,
    /// The request never got a response.
    Transport(reqwest::Error),
    /// The API answered with a non-success status.
    Api {
        /// HTTP status
        status: u16,
        /// Raw response body
        body: String,
    },
    /// The response body was not the JSON we expected.
    Decode(serde_json::Error),
    /// The API answered but without any content.
    EmptyResponse(String),
}

impl std::fmt::Display for GenAiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "No API key configured, set GOOGLE_API_KEY and restart the server"
            ),
            Self::Transport(err) => write!(f, "Model request failed: {err}"),
            Self::Api { status, body } => write!(f, "Model API error {status}: {body}"),
            Self::Decode(err) => write!(f, "Failed to parse model response: {err}"),
            Self::EmptyResponse(reason) => write!(f, "Model returned no content: {reason}"),
        }
    }
}

impl std::error::Error for GenAiError {}

impl From<reqwest::Error> for GenAiError {
    fn from(err: reqwest::Error) -> Self {
        GenAiError::Transport(err)
    }
}

impl From<serde_json::Error> for GenAiError {
    fn from(err: serde_json::Error) -> Self {
        GenAiError::Decode(err)
    }
}

/// The two model capabilities the campaign pipeline needs.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Runs the text model over an instruction plus image, returning its answer verbatim.
    async fn synthesize_text(&self, image: &InlineData, instruction: &str)
    -> Result<String, GenAiError>;

    /// Runs the image model over an instruction plus image, returning the
    /// parts of its answer in order.
    async fn synthesize_image(
        &self,
        image: &InlineData,
        instruction: &str,
    ) -> Result<Vec<Part>, GenAiError>;

    /// False when calls are known to fail for lack of credentials.
    fn is_configured(&self) -> bool {
        true
    }
}
