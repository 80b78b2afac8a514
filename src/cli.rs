//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;

use crate::config::GenAiConfig;
use crate::constants::{DEFAULT_API_BASE, DEFAULT_IMAGE_MODEL, DEFAULT_MAX_UPLOAD_MB, DEFAULT_TEXT_MODEL};

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "ADSTUDIO_DEBUG")]
    /// Enable debug logging. Env: ADSTUDIO_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "5000", env = "ADSTUDIO_PORT")]
    /// http listener, defaults to `5000`.
    /// Env: ADSTUDIO_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "ADSTUDIO_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: ADSTUDIO_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, default_value_t = DEFAULT_MAX_UPLOAD_MB, env = "ADSTUDIO_MAX_UPLOAD_MB")]
    /// Largest accepted upload in megabytes.
    /// Env: ADSTUDIO_MAX_UPLOAD_MB
    pub max_upload_mb: usize,

    #[clap(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    /// Generative Language API key. Generation fails at request time without it.
    /// Env: GOOGLE_API_KEY
    pub google_api_key: Option<String>,

    #[clap(long, default_value = DEFAULT_TEXT_MODEL, env = "ADSTUDIO_TEXT_MODEL")]
    /// Model used to write the ad concept
    pub text_model: String,

    #[clap(long, default_value = DEFAULT_IMAGE_MODEL, env = "ADSTUDIO_IMAGE_MODEL")]
    /// Model used to render the ad images
    pub image_model: String,

    #[clap(long, default_value = DEFAULT_API_BASE, env = "ADSTUDIO_API_BASE")]
    /// Base URL of the model API
    pub api_base: String,
}

impl CliOptions {
    /// Builds the model client configuration from the parsed options
    pub fn genai_config(&self) -> GenAiConfig {
        GenAiConfig {
            api_key: self
                .google_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            api_base: self.api_base.trim_end_matches('/').to_string(),
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
        }
    }

    /// Upload limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
