//! Config handling

use tracing::log::LevelFilter;

/// Settings for the generative model client, fixed at startup.
#[derive(Clone, Debug, Default)]
pub struct GenAiConfig {
    /// API key, `None` leaves the client unconfigured and every call fails.
    pub api_key: Option<String>,
    /// Base URL without trailing slash, eg `https://generativelanguage.googleapis.com/v1beta`
    pub api_base: String,
    /// Model used for concept synthesis
    pub text_model: String,
    /// Model used for image synthesis
    pub image_model: String,
}

impl GenAiConfig {
    /// True when an API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}
