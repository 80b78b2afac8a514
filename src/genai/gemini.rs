use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::{GenAiError, GenerativeBackend, InlineData, Part};
use crate::config::GenAiConfig;
use crate::constants::API_KEY_HEADER;

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    config: GenAiConfig,
}

impl GeminiClient {
    /// Builds a client; a missing API key only fails once a call is made.
    pub fn new(config: GenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.api_base, model)
    }

    #[instrument(skip_all, fields(model = %model))]
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenAiError::MissingApiKey)?;

        let resp = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        debug!("{model} answered {status} ({} bytes)", bytes.len());
        if !status.is_success() {
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).to_string(),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn synthesize_text(
        &self,
        image: &InlineData,
        instruction: &str,
    ) -> Result<String, GenAiError> {
        let request = GenerateContentRequest::instruction_with_image(instruction, image);
        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;

        let parts = response.first_parts();
        if parts.is_empty() {
            return Err(GenAiError::EmptyResponse(response.empty_reason()));
        }
        Ok(parts.iter().filter_map(Part::as_text).collect())
    }

    async fn synthesize_image(
        &self,
        image: &InlineData,
        instruction: &str,
    ) -> Result<Vec<Part>, GenAiError> {
        let request = GenerateContentRequest::instruction_with_image(instruction, image)
            .with_modalities(&["TEXT", "IMAGE"]);
        let response = self
            .generate_content(&self.config.image_model, &request)
            .await?;

        let parts = response.first_parts();
        if parts.is_empty() {
            return Err(GenAiError::EmptyResponse(response.empty_reason()));
        }
        Ok(parts.to_vec())
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}
