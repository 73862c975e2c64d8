use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::LlmClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analyze_handler, health_handler, topic_handler, upload_handler,
};
use crate::presentation::state::AppState;

/// Headroom for multipart framing and the text fields around the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router<L>(state: AppState<L>) -> Router
where
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Base64 inflates a recording by a third.
    let max_upload = state.settings.analysis.max_upload_bytes();
    let json_limit = max_upload / 3 * 4 + MULTIPART_OVERHEAD_BYTES;
    let multipart_limit = max_upload + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/topic", get(topic_handler::<L>))
        .route(
            "/api/v1/analyze",
            post(analyze_handler::<L>).layer(DefaultBodyLimit::max(json_limit)),
        )
        .route(
            "/api/v1/analyze/upload",
            post(upload_handler::<L>).layer(DefaultBodyLimit::max(multipart_limit)),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
