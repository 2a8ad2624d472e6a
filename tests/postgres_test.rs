//! Runs against a live database. Set `PG_DSN` and run with
//! `cargo test -- --ignored`.

use matty_server::{
    models::{ACTION_NOTE_ADDED, ACTION_NOTE_DELETED},
    repository::{DocumentStore, PostgresStore},
};
use serde_json::json;

async fn connect() -> PostgresStore {
    let dsn = std::env::var("PG_DSN").expect("PG_DSN must point at a test database");
    let store = PostgresStore::new(&dsn).await.unwrap();
    store.migrate().await.unwrap();
    store
}

#[tokio::test]
#[ignore = "needs a PostgreSQL database in PG_DSN"]
async fn postgres_backend_audits_orders_and_rolls_back() {
    let store = connect().await;
    let tag = format!("pg-test-{}", chrono::Utc::now().timestamp_micros());

    // writes are audited in the same transaction
    let first = store.insert_note(&format!("{tag} first")).await.unwrap();
    let second = store.insert_note(&format!("{tag} second")).await.unwrap();

    let log = store.list_activity(1).await.unwrap();
    assert_eq!(log[0].action, ACTION_NOTE_ADDED);
    assert_eq!(log[0].meta["noteId"], second.id);

    // newest first, ties broken by id
    let notes = store.list_notes(2).await.unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, second.id);
    assert_eq!(notes[1].id, first.id);

    let deleted = store.delete_note(first.id).await.unwrap().unwrap();
    assert_eq!(deleted.text, first.text);
    let log = store.list_activity(1).await.unwrap();
    assert_eq!(log[0].action, ACTION_NOTE_DELETED);
    assert_eq!(log[0].meta["noteId"], first.id);
    let latest_entry = log[0].id;

    // a miss rolls back and writes no audit entry
    assert!(store.delete_note(first.id).await.unwrap().is_none());
    let log = store.list_activity(1).await.unwrap();
    assert_eq!(log[0].id, latest_entry);

    assert!(store.delete_activity(latest_entry).await.unwrap());
    assert!(!store.delete_activity(latest_entry).await.unwrap());

    store.insert_design(&tag, json!({ "v": 1 })).await.unwrap();
    store.insert_design(&tag, json!({ "v": 2 })).await.unwrap();
    let designs = store.list_designs(&tag).await.unwrap();
    assert_eq!(designs.len(), 2);
    assert_eq!(designs[0].design, json!({ "v": 2 }));

    store.delete_note(second.id).await.unwrap();
}
