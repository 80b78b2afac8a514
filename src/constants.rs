//! Shared constants for things
//!

/// Default multimodal text model used for concept synthesis
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Default image model used for ad synthesis
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

/// Base URL of the Generative Language REST API
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key on every model call
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Default upload limit for `POST /generate`, in megabytes.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 16;

/// Returned when the upload has no (or an empty) `image` field
pub const MSG_NO_IMAGE: &str = "No image uploaded";

/// Returned when `target` or `styles` are missing
pub const MSG_MISSING_FIELDS: &str = "Missing required fields";
