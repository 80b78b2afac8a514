//! Error handling

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use tracing::{error, info};

use crate::genai::GenAiError;

/// Errors for the adstudio application.
#[derive(Debug)]
pub enum AdStudioError {
    /// A required form field was absent or empty
    MissingField(&'static str),
    /// The request body could not be read as a form
    BadRequest(String),
    /// The multipart stream broke mid-read, eg the upload limit was hit
    Upload(MultipartError),
    /// The upload is not a decodable image
    ImageDecode(image::ImageError),
    /// The concept model call failed
    Generation(GenAiError),
    /// When an internal server error occurs
    InternalServerError(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl std::fmt::Display for AdStudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(message) => f.write_str(message),
            Self::BadRequest(message) => f.write_str(message),
            Self::Upload(err) => write!(f, "{}", err.body_text()),
            Self::ImageDecode(err) => write!(f, "{err}"),
            Self::Generation(err) => write!(f, "{err}"),
            Self::InternalServerError(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for AdStudioError {}

impl From<GenAiError> for AdStudioError {
    fn from(err: GenAiError) -> Self {
        AdStudioError::Generation(err)
    }
}

impl From<image::ImageError> for AdStudioError {
    fn from(err: image::ImageError) -> Self {
        AdStudioError::InternalServerError(err.to_string())
    }
}

impl From<MultipartError> for AdStudioError {
    fn from(err: MultipartError) -> Self {
        AdStudioError::Upload(err)
    }
}

impl From<MultipartRejection> for AdStudioError {
    fn from(err: MultipartRejection) -> Self {
        AdStudioError::BadRequest(err.body_text())
    }
}

impl AdStudioError {
    /// HTTP status this error answers with
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upload(err) => err.status(),
            Self::ImageDecode(_) | Self::Generation(_) | Self::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AdStudioError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = self.to_string();
        match &self {
            AdStudioError::MissingField(_) | AdStudioError::BadRequest(_) => {
                info!("Bad request received: {message}");
            }
            AdStudioError::Upload(_) => info!("Upload failed ({status}): {message}"),
            AdStudioError::ImageDecode(_) => error!("Failed to decode upload: {message}"),
            AdStudioError::Generation(_) => error!("Concept generation failed: {message}"),
            AdStudioError::InternalServerError(_) => {
                error!("Internal server error: {message}")
            }
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
