use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{handlers::rest, service::MattyService};

/// Builds the HTTP surface around an already wired service.
pub fn router(service: Arc<MattyService>) -> Router {
    Router::new()
        .route("/", get(rest::root))
        .route("/api/ai/generate", post(rest::generate_text))
        .route("/api/ai/image", post(rest::generate_image))
        .route("/api/notes", get(rest::get_notes))
        .route("/api/notes", post(rest::create_note))
        .route("/api/notes/{id}", delete(rest::delete_note))
        .route("/api/activity", get(rest::get_activity))
        .route("/api/activity", post(rest::create_activity))
        .route("/api/activity/{id}", delete(rest::delete_activity))
        .route("/api/designs", post(rest::save_design))
        .route("/api/designs/{user_id}", get(rest::get_designs))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()),
        )
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
