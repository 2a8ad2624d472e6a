use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{DocumentStore, StoreError};
use crate::models::{
    ACTION_NOTE_ADDED, ACTION_NOTE_DELETED, ActivityEntry, Design, Note, note_meta,
};

/// Process-local store, used by tests and by `storage.backend: memory`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

#[derive(Default)]
struct Collections {
    last_id: i64,
    notes: Vec<Note>,
    activity: Vec<ActivityEntry>,
    designs: Vec<Design>,
}

impl Collections {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn push_activity(&mut self, action: &str, meta: Value) -> ActivityEntry {
        let entry = ActivityEntry {
            id: self.next_id(),
            action: action.to_string(),
            meta,
            created_at: Utc::now(),
        };
        self.activity.push(entry.clone());
        entry
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T: Clone>(
    items: &[T],
    key: impl Fn(&T) -> (DateTime<Utc>, i64),
    limit: usize,
) -> Vec<T> {
    let mut sorted: Vec<T> = items.to_vec();
    sorted.sort_by_key(|item| std::cmp::Reverse(key(item)));
    sorted.truncate(limit);
    sorted
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_note(&self, text: &str) -> Result<Note, StoreError> {
        let mut inner = self.inner.lock().await;
        let note = Note {
            id: inner.next_id(),
            text: text.to_string(),
            created_at: Utc::now(),
        };
        inner.push_activity(ACTION_NOTE_ADDED, note_meta(&note));
        inner.notes.push(note.clone());
        Ok(note)
    }

    async fn list_notes(&self, limit: usize) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(newest_first(&inner.notes, |n| (n.created_at, n.id), limit))
    }

    async fn delete_note(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(pos) = inner.notes.iter().position(|n| n.id == id) else {
            return Ok(None);
        };
        let note = inner.notes.remove(pos);
        inner.push_activity(ACTION_NOTE_DELETED, note_meta(&note));
        Ok(Some(note))
    }

    async fn insert_activity(
        &self,
        action: &str,
        meta: Value,
    ) -> Result<ActivityEntry, StoreError> {
        Ok(self.inner.lock().await.push_activity(action, meta))
    }

    async fn list_activity(&self, limit: usize) -> Result<Vec<ActivityEntry>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(newest_first(&inner.activity, |a| (a.created_at, a.id), limit))
    }

    async fn delete_activity(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().await;
        let before = inner.activity.len();
        inner.activity.retain(|a| a.id != id);
        Ok(inner.activity.len() != before)
    }

    async fn insert_design(&self, user_id: &str, design: Value) -> Result<Design, StoreError> {
        let mut inner = self.inner.lock().await;
        let design = Design {
            id: inner.next_id(),
            user_id: user_id.to_string(),
            design,
            created_at: Utc::now(),
        };
        inner.designs.push(design.clone());
        Ok(design)
    }

    async fn list_designs(&self, user_id: &str) -> Result<Vec<Design>, StoreError> {
        let inner = self.inner.lock().await;
        let owned: Vec<Design> = inner
            .designs
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(&owned, |d| (d.created_at, d.id), usize::MAX))
    }
}
