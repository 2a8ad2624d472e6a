use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{
        ActivityResponse, CreateActivityRequest, CreateDesignRequest, CreateNoteRequest,
        DeletedResponse, DesignResponse, DesignSavedResponse, ErrorResponse, GenerateRequest,
        GenerateResponse, HealthResponse, ImageRequest, ImageResponse, ListQuery, NoteResponse,
    },
    error::ApiError,
    extract::{AppJson, AppQuery},
    service::MattyService,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        root,
        generate_text,
        generate_image,
        create_note,
        get_notes,
        delete_note,
        create_activity,
        get_activity,
        delete_activity,
        save_design,
        get_designs
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        ActivityResponse,
        CreateActivityRequest,
        DeletedResponse,
        ErrorResponse,
        HealthResponse,
        GenerateRequest,
        GenerateResponse,
        ImageRequest,
        ImageResponse,
        CreateDesignRequest,
        DesignResponse,
        DesignSavedResponse
    )),
    tags(
        (name = "ai", description = "Canned assistant and placeholder images"),
        (name = "notes", description = "Notes management API"),
        (name = "activity", description = "Activity log"),
        (name = "designs", description = "Saved canvas designs")
    )
)]
pub struct ApiDoc;

fn parse_id(raw: &str, what: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {what} id")))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    )
)]
pub async fn root() -> Response {
    let health = HealthResponse {
        message: "✅ Matty-AI Backend Running".to_string(),
    };
    (StatusCode::OK, Json(health)).into_response()
}

#[utoipa::path(
    post,
    path = "/api/ai/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Assistant reply", body = GenerateResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse)
    ),
    tag = "ai"
)]
#[debug_handler]
pub async fn generate_text(
    State(service): State<Arc<MattyService>>,
    AppJson(payload): AppJson<GenerateRequest>,
) -> Response {
    let output = service.generate_text(&payload.prompt);
    (StatusCode::OK, Json(GenerateResponse { output })).into_response()
}

#[utoipa::path(
    post,
    path = "/api/ai/image",
    request_body = ImageRequest,
    responses(
        (status = 200, description = "Placeholder image as a PNG data URI", body = ImageResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "ai"
)]
#[debug_handler]
pub async fn generate_image(
    State(service): State<Arc<MattyService>>,
    AppJson(payload): AppJson<ImageRequest>,
) -> Response {
    match service.generate_image(payload.prompt.as_deref()).await {
        Ok(image) => (StatusCode::OK, Json(ImageResponse { image })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Blank text", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<MattyService>>,
    AppJson(payload): AppJson<CreateNoteRequest>,
) -> Response {
    match service.create_note(payload).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/notes",
    params(ListQuery),
    responses(
        (status = 200, description = "Newest notes first", body = Vec<NoteResponse>),
        (status = 400, description = "Malformed limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_notes(
    State(service): State<Arc<MattyService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Response {
    match service.list_notes(query.limit).await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = DeletedResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<MattyService>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id, "note") {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match service.delete_note(id).await {
        Ok(true) => (StatusCode::OK, Json(DeletedResponse::new(id))).into_response(),
        Ok(false) => ApiError::not_found("Note not found").into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/activity",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Entry recorded", body = ActivityResponse),
        (status = 400, description = "Blank action", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "activity"
)]
#[debug_handler]
pub async fn create_activity(
    State(service): State<Arc<MattyService>>,
    AppJson(payload): AppJson<CreateActivityRequest>,
) -> Response {
    match service.create_activity(payload).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/activity",
    params(ListQuery),
    responses(
        (status = 200, description = "Newest entries first", body = Vec<ActivityResponse>),
        (status = 400, description = "Malformed limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "activity"
)]
#[debug_handler]
pub async fn get_activity(
    State(service): State<Arc<MattyService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Response {
    match service.list_activity(query.limit).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/activity/{id}",
    params(
        ("id" = i64, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry deleted", body = DeletedResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "activity"
)]
#[debug_handler]
pub async fn delete_activity(
    State(service): State<Arc<MattyService>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id, "activity") {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match service.delete_activity(id).await {
        Ok(true) => (StatusCode::OK, Json(DeletedResponse::new(id))).into_response(),
        Ok(false) => ApiError::not_found("Activity not found").into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/designs",
    request_body = CreateDesignRequest,
    responses(
        (status = 201, description = "Design saved", body = DesignSavedResponse),
        (status = 400, description = "Missing userId or design", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "designs"
)]
#[debug_handler]
pub async fn save_design(
    State(service): State<Arc<MattyService>>,
    AppJson(payload): AppJson<CreateDesignRequest>,
) -> Response {
    match service.save_design(payload).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/designs/{user_id}",
    params(
        ("user_id" = String, Path, description = "Owner of the designs")
    ),
    responses(
        (status = 200, description = "Designs, newest first", body = Vec<DesignResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "designs"
)]
#[debug_handler]
pub async fn get_designs(
    State(service): State<Arc<MattyService>>,
    Path(user_id): Path<String>,
) -> Response {
    match service.list_designs(&user_id).await {
        Ok(designs) => (StatusCode::OK, Json(designs)).into_response(),
        Err(e) => e.into_response(),
    }
}
