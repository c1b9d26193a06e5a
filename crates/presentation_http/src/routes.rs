//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{handlers, middleware::request_id, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.server.max_upload_bytes;
    let json_limit = state.config.server.max_json_bytes;
    let static_dir = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/", get(handlers::index::index))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Tutor API
        .route("/api/send_text", post(handlers::tutor::send_text))
        .route(
            "/api/stt",
            post(handlers::speech::speech_to_text).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/tts", post(handlers::speech::text_to_speech))
        // Synthesized audio
        .route("/temp/{filename}", get(handlers::audio::serve_audio))
        .nest_service("/static", static_dir)
        .layer(DefaultBodyLimit::max(json_limit))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}
