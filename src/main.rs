use std::sync::Arc;

use adstudio::config::setup_logging;
use adstudio::genai::GeminiClient;
use adstudio::web::AppState;
use clap::Parser;
use tracing::{error, info, warn};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = adstudio::cli::CliOptions::parse();

    if let Err(err) = setup_logging(cli.debug) {
        eprintln!("Logging setup error: {}", err);
        return;
    }

    let config = cli.genai_config();
    if config.is_configured() {
        info!(
            "Using text model {} and image model {}",
            config.text_model, config.image_model
        );
    } else {
        warn!("GOOGLE_API_KEY is not set, every generation request will fail");
    }

    let state = AppState::new(Arc::new(GeminiClient::new(config)), cli.max_upload_bytes());

    if let Err(err) = adstudio::web::setup_server(&cli.listen_address, cli.port, state).await {
        error!("Application error: {}", err);
    }
}
