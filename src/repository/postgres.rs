use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio_postgres::{Client, GenericClient, NoTls, Row};

use super::{DocumentStore, StoreError, embedded::migrations};
use crate::models::{
    ACTION_NOTE_ADDED, ACTION_NOTE_DELETED, ActivityEntry, Design, Note, note_meta,
};

pub struct PostgresStore {
    client: Mutex<Client>,
}

impl PostgresStore {
    pub async fn new(database_dsn: &str) -> Result<Self, StoreError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self {
            client: Mutex::new(client),
        })
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        let mut client = self.client.lock().await;
        let migrations_report = migrations::runner().run_async(&mut *client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        text: row.get("text"),
        created_at: row.get("created_at"),
    }
}

fn activity_from_row(row: &Row) -> ActivityEntry {
    ActivityEntry {
        id: row.get("id"),
        action: row.get("action"),
        meta: row.get("meta"),
        created_at: row.get("created_at"),
    }
}

fn design_from_row(row: &Row) -> Design {
    Design {
        id: row.get("id"),
        user_id: row.get("user_id"),
        design: row.get("design"),
        created_at: row.get("created_at"),
    }
}

async fn append_activity<C: GenericClient + Sync>(
    client: &C,
    action: &str,
    meta: &Value,
) -> Result<ActivityEntry, tokio_postgres::Error> {
    let row = client
        .query_one(
            "INSERT INTO activity (action, meta) VALUES ($1, $2) RETURNING id, action, meta, created_at",
            &[&action, meta],
        )
        .await?;

    Ok(activity_from_row(&row))
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn insert_note(&self, text: &str) -> Result<Note, StoreError> {
        let mut client = self.client.lock().await;
        let tx = client.transaction().await?;

        let row = tx
            .query_one(
                "INSERT INTO notes (text) VALUES ($1) RETURNING id, text, created_at",
                &[&text],
            )
            .await?;
        let note = note_from_row(&row);

        append_activity(&tx, ACTION_NOTE_ADDED, &note_meta(&note)).await?;
        tx.commit().await?;

        Ok(note)
    }

    async fn list_notes(&self, limit: usize) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client
            .lock()
            .await
            .query(
                "SELECT id, text, created_at FROM notes ORDER BY created_at DESC, id DESC LIMIT $1",
                &[&sql_limit(limit)],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn delete_note(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let mut client = self.client.lock().await;
        let tx = client.transaction().await?;

        let row = tx
            .query_opt(
                "DELETE FROM notes WHERE id = $1 RETURNING id, text, created_at",
                &[&id],
            )
            .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };
        let note = note_from_row(&row);

        append_activity(&tx, ACTION_NOTE_DELETED, &note_meta(&note)).await?;
        tx.commit().await?;

        Ok(Some(note))
    }

    async fn insert_activity(
        &self,
        action: &str,
        meta: Value,
    ) -> Result<ActivityEntry, StoreError> {
        let client = self.client.lock().await;
        Ok(append_activity(&*client, action, &meta).await?)
    }

    async fn list_activity(&self, limit: usize) -> Result<Vec<ActivityEntry>, StoreError> {
        let rows = self
            .client
            .lock()
            .await
            .query(
                "SELECT id, action, meta, created_at FROM activity ORDER BY created_at DESC, id DESC LIMIT $1",
                &[&sql_limit(limit)],
            )
            .await?;

        Ok(rows.iter().map(activity_from_row).collect())
    }

    async fn delete_activity(&self, id: i64) -> Result<bool, StoreError> {
        let rows = self
            .client
            .lock()
            .await
            .execute("DELETE FROM activity WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }

    async fn insert_design(&self, user_id: &str, design: Value) -> Result<Design, StoreError> {
        let row = self
            .client
            .lock()
            .await
            .query_one(
                "INSERT INTO designs (user_id, design) VALUES ($1, $2) RETURNING id, user_id, design, created_at",
                &[&user_id, &design],
            )
            .await?;

        Ok(design_from_row(&row))
    }

    async fn list_designs(&self, user_id: &str) -> Result<Vec<Design>, StoreError> {
        let rows = self
            .client
            .lock()
            .await
            .query(
                "SELECT id, user_id, design, created_at FROM designs WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
                &[&user_id],
            )
            .await?;

        Ok(rows.iter().map(design_from_row).collect())
    }
}
