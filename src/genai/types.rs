//! Wire types for the `generateContent` endpoint.

use base64::Engine;
use base64::engine::general_purpose;
use serde::{Deserialize, Serialize};

/// A base64 payload with its MIME type, used for images in both directions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// eg `image/png`
    pub mime_type: String,
    /// Standard base64, no data-URL prefix
    pub data: String,
}

impl InlineData {
    /// Wraps raw bytes, base64-encoding them.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Decodes the base64 payload.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        general_purpose::STANDARD.decode(self.data.as_bytes())
    }

    /// True when the payload is an image
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// One part of a content turn.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Plain text
    Text {
        /// the text
        text: String,
        /// Set on "thinking" parts, which are not part of the answer.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thought: Option<bool>,
    },
    /// Inline media
    InlineData {
        /// the media payload
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    /// Anything else the API sends back (function calls, code execution...)
    Other(serde_json::Value),
}

impl Part {
    /// Builds a text part
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text {
            text: text.into(),
            thought: None,
        }
    }

    /// Returns the answer text of this part, skipping thought parts.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text, thought } if !thought.unwrap_or(false) => Some(text),
            _ => None,
        }
    }

    /// Returns the inline payload when it carries image data.
    pub fn inline_image(&self) -> Option<&InlineData> {
        match self {
            Part::InlineData { inline_data } if inline_data.is_image() => Some(inline_data),
            _ => None,
        }
    }
}

/// A content turn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// `user` on requests, `model` on responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Parts in order
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Generation settings we send.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// eg `["TEXT", "IMAGE"]` for image models
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_modalities: Vec<String>,
}

/// Request body for `POST models/{model}:generateContent`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation, a single user turn here
    pub contents: Vec<Content>,
    /// Optional generation settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user turn with an instruction followed by an image.
    pub fn instruction_with_image(instruction: &str, image: &InlineData) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::text(instruction),
                    Part::InlineData {
                        inline_data: image.clone(),
                    },
                ],
            }],
            generation_config: None,
        }
    }

    /// Asks for the given response modalities
    pub fn with_modalities(mut self, modalities: &[&str]) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_modalities: modalities.iter().map(|m| m.to_string()).collect(),
        });
        self
    }
}

/// Top-level `generateContent` response envelope.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidates, we only ever look at the first
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Set when the prompt itself was blocked
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// Candidate completion item.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Missing when the candidate was filtered
    #[serde(default)]
    pub content: Option<Content>,
    /// eg `STOP`, `SAFETY`
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Why a prompt was rejected
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// eg `SAFETY`
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate, empty when there are none.
    pub fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    /// Explains an empty answer using whatever feedback the API gave.
    pub fn empty_reason(&self) -> String {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return format!("prompt blocked: {reason}");
        }
        match self
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
        {
            Some(reason) => format!("no content returned (finish reason {reason})"),
            None => "no candidates returned".to_string(),
        }
    }
}
