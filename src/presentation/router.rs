use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::GenerativeModel;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    batch_handler, chat_handler, health_handler, process_file_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<M>(state: AppState<M>) -> Router
where
    M: GenerativeModel + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.server.max_request_bytes);

    Router::new()
        .route("/health", get(health_handler))
        .route("/process_file", post(process_file_handler::<M>))
        .route("/process-multiple-pdfs", post(batch_handler::<M>))
        .route("/api/chat", post(chat_handler::<M>))
        .route("/chat", post(chat_handler::<M>))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
