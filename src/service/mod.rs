use crate::{
    config::Limits,
    dto::{
        ActivityResponse, CreateActivityRequest, CreateDesignRequest, CreateNoteRequest,
        DesignResponse, DesignSavedResponse, NoteResponse,
    },
    error::ApiError,
    placeholder,
    repository::DocumentStore,
    responder,
};

use std::sync::Arc;

pub const DESIGN_SAVED_MESSAGE: &str = "✅ Design saved successfully!";
pub const DEFAULT_IMAGE_PROMPT: &str = "No prompt provided";

#[derive(Clone)]
pub struct MattyService {
    store: Arc<dyn DocumentStore>,
    limits: Limits,
}

/// Clamps a requested page size into `1..=max`, defaulting to `max`.
pub fn clamp_limit(requested: Option<usize>, max: usize) -> usize {
    requested.map_or(max, |n| n.clamp(1, max))
}

impl MattyService {
    pub fn new(store: Arc<dyn DocumentStore>, limits: Limits) -> Self {
        Self { store, limits }
    }

    pub fn generate_text(&self, prompt: &str) -> String {
        responder::respond(prompt)
    }

    /// Renders and encodes the placeholder on the blocking pool.
    pub async fn generate_image(&self, prompt: Option<&str>) -> Result<String, ApiError> {
        let prompt = prompt.unwrap_or(DEFAULT_IMAGE_PROMPT).to_string();
        let image = tokio::task::spawn_blocking(move || {
            placeholder::generate(&prompt, &mut rand::thread_rng())
        })
        .await??;
        Ok(image)
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<NoteResponse, ApiError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(ApiError::bad_request("text is required"));
        }

        let note = self.store.insert_note(text).await?;
        tracing::info!("note {} created", note.id);
        Ok(note.into())
    }

    pub async fn list_notes(&self, limit: Option<usize>) -> Result<Vec<NoteResponse>, ApiError> {
        let limit = clamp_limit(limit, self.limits.notes);
        let notes = self.store.list_notes(limit).await?;
        Ok(notes.into_iter().map(Into::into).collect())
    }

    /// Removes a note. `Ok(false)` means no note had this id.
    pub async fn delete_note(&self, id: i64) -> Result<bool, ApiError> {
        let deleted = self.store.delete_note(id).await?;
        if deleted.is_some() {
            tracing::info!("note {id} deleted");
        }
        Ok(deleted.is_some())
    }

    pub async fn create_activity(
        &self,
        request: CreateActivityRequest,
    ) -> Result<ActivityResponse, ApiError> {
        let action = request.action.trim();
        if action.is_empty() {
            return Err(ApiError::bad_request("action is required"));
        }

        let entry = self.store.insert_activity(action, request.meta).await?;
        tracing::debug!("activity {} recorded: {}", entry.id, entry.action);
        Ok(entry.into())
    }

    pub async fn list_activity(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityResponse>, ApiError> {
        let limit = clamp_limit(limit, self.limits.activity);
        let entries = self.store.list_activity(limit).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    pub async fn delete_activity(&self, id: i64) -> Result<bool, ApiError> {
        Ok(self.store.delete_activity(id).await?)
    }

    pub async fn save_design(
        &self,
        request: CreateDesignRequest,
    ) -> Result<DesignSavedResponse, ApiError> {
        let user_id = request.user_id.as_deref().map(str::trim).unwrap_or_default();
        let design = request.design.filter(|d| !d.is_null());

        let Some(design) = design.filter(|_| !user_id.is_empty()) else {
            return Err(ApiError::bad_request("userId and design are required"));
        };

        let saved = self.store.insert_design(user_id, design).await?;
        tracing::info!("design {} saved for user '{}'", saved.id, saved.user_id);
        Ok(DesignSavedResponse {
            message: DESIGN_SAVED_MESSAGE.to_string(),
            design: saved.into(),
        })
    }

    pub async fn list_designs(&self, user_id: &str) -> Result<Vec<DesignResponse>, ApiError> {
        let designs = self.store.list_designs(user_id).await?;
        Ok(designs.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_never_exceeds_max() {
        assert_eq!(clamp_limit(None, 50), 50);
        assert_eq!(clamp_limit(Some(10), 50), 10);
        assert_eq!(clamp_limit(Some(500), 50), 50);
        assert_eq!(clamp_limit(Some(0), 20), 1);
    }

    #[tokio::test]
    async fn image_is_encoded_off_the_runtime() {
        let service = MattyService::new(
            Arc::new(crate::repository::MemoryStore::new()),
            Limits::default(),
        );
        let image = service.generate_image(None).await.unwrap();
        assert!(image.starts_with(placeholder::DATA_URI_PREFIX));
    }
}
