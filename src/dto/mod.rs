use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::models::{ActivityEntry, Design, Note};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note text
    pub text: String,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note text, must not be blank
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    /// Entry ID
    pub id: i64,
    /// What happened
    pub action: String,
    /// Free-form details
    #[schema(value_type = Object)]
    pub meta: Value,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateActivityRequest {
    /// What happened, must not be blank
    #[serde(default)]
    pub action: String,
    /// Free-form details, defaults to `{}`
    #[serde(default = "empty_object")]
    #[schema(value_type = Object)]
    pub meta: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    /// Always `deleted`
    pub status: String,
    /// ID of the removed record
    pub id: i64,
}

impl DeletedResponse {
    pub fn new(id: i64) -> Self {
        Self {
            status: "deleted".to_string(),
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Free-text prompt
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageRequest {
    /// Text to write on the image
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageResponse {
    /// `data:image/png;base64,...`
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDesignRequest {
    pub user_id: Option<String>,
    #[schema(value_type = Object)]
    pub design: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignResponse {
    pub id: i64,
    pub user_id: String,
    #[schema(value_type = Object)]
    pub design: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DesignSavedResponse {
    pub message: String,
    pub design: DesignResponse,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Maximum number of items; capped at the server's fixed limit
    pub limit: Option<usize>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            text: note.text,
            created_at: note.created_at,
        }
    }
}

impl From<ActivityEntry> for ActivityResponse {
    fn from(entry: ActivityEntry) -> Self {
        Self {
            id: entry.id,
            action: entry.action,
            meta: entry.meta,
            created_at: entry.created_at,
        }
    }
}

impl From<Design> for DesignResponse {
    fn from(design: Design) -> Self {
        Self {
            id: design.id,
            user_id: design.user_id,
            design: design.design,
            created_at: design.created_at,
        }
    }
}
