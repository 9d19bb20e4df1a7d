use super::{ServiceSettings, handlers};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::Level;

pub fn create_router(settings: ServiceSettings) -> Router {
    // Cross-origin access is granted to the resize endpoint only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/resizeimage", post(handlers::resize_images).layer(cors))
        // Bound the multipart body, every upload is held in memory
        .layer(DefaultBodyLimit::max(settings.max_body_bytes))
        // Add tracing for HTTP requests and responses
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        .with_state(settings)
}
