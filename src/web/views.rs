use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use super::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub(crate) configured: bool,
    pub(crate) max_upload_mb: usize,
}

/// handles the / GET
pub(crate) async fn root_handler(State(state): State<AppState>) -> IndexTemplate {
    IndexTemplate {
        configured: state.backend.is_configured(),
        max_upload_mb: state.max_upload_bytes / (1024 * 1024),
    }
}

pub(crate) async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}
