use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Note {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub id: i64,
    pub action: String,
    pub meta: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Design {
    pub id: i64,
    pub user_id: String,
    pub design: Value,
    pub created_at: DateTime<Utc>,
}

/// Activity actions recorded alongside note writes.
pub const ACTION_NOTE_ADDED: &str = "Added Note";
pub const ACTION_NOTE_DELETED: &str = "Deleted Note";

const PREVIEW_CHARS: usize = 80;

/// Builds the `meta` payload attached to a note's audit entry.
pub fn note_meta(note: &Note) -> Value {
    let preview: String = note.text.chars().take(PREVIEW_CHARS).collect();
    serde_json::json!({
        "noteId": note.id,
        "preview": preview,
    })
}
