//! Test helper utilities
//!
//! Shared setup for the wfp-intake integration tests: in-memory store
//! construction, full pipeline wiring, and submission builders.

#![allow(dead_code)]

use std::sync::Arc;
use wfp_common::config::TomlConfig;
use wfp_intake::config::IntakeSettings;
use wfp_intake::models::{SubmissionField, WebformSubmission};
use wfp_intake::store::SqliteStore;
use wfp_intake::AppState;

/// In-memory store with the intake schema applied
pub async fn memory_store() -> SqliteStore {
    let pool = wfp_common::db::open_memory_pool().await.unwrap();
    wfp_intake::db::create_schema(&pool).await.unwrap();
    SqliteStore::new(pool)
}

/// Default settings (in-memory tests never touch the database path)
pub fn test_settings() -> IntakeSettings {
    IntakeSettings::from_config(TomlConfig::default()).unwrap()
}

/// Full pipeline state over a clone of the given store
pub async fn test_app_state(store: &SqliteStore) -> AppState {
    wfp_intake::init_pipeline(Arc::new(store.clone()), &test_settings())
        .await
        .unwrap()
}

pub fn field(key: &str, value: &str) -> SubmissionField {
    SubmissionField {
        field_key: key.to_string(),
        field_value: vec![value.to_string()],
    }
}

/// Complete, valid petition submission for Ann Lee on campaign 42
pub fn petition_submission() -> WebformSubmission {
    WebformSubmission {
        webform_title: "Save the Wetlands".to_string(),
        data: vec![
            field("processing_class", "Petition"),
            field("petition_first_name", "Ann"),
            field("petition_last_name", "Lee"),
            field("petition_email", "ann.lee@example.org"),
            field("petition_campaign_id", "42"),
        ],
    }
}

/// Replace or append a field on a submission
pub fn set_field(submission: &mut WebformSubmission, key: &str, value: &str) {
    for f in &mut submission.data {
        if f.field_key == key {
            f.field_value = vec![value.to_string()];
            return;
        }
    }
    submission.data.push(field(key, value));
}

pub async fn seed_campaign(store: &SqliteStore, id: i64, title: &str) {
    sqlx::query("INSERT INTO campaigns (id, title) VALUES (?1, ?2)")
        .bind(id)
        .bind(title)
        .execute(store.pool())
        .await
        .unwrap();
}

/// Seed the optional Completed activity status; returns its id
pub async fn seed_completed_status(store: &SqliteStore) -> i64 {
    sqlx::query(
        "INSERT INTO option_values (option_group, name, label) \
         VALUES ('activity_status', 'Completed', 'Completed')",
    )
    .execute(store.pool())
    .await
    .unwrap()
    .last_insert_rowid()
}

pub async fn seed_group(store: &SqliteStore, id: i64, name: &str) {
    sqlx::query("INSERT INTO groups (id, name, title) VALUES (?1, ?2, ?2)")
        .bind(id)
        .bind(name)
        .execute(store.pool())
        .await
        .unwrap();
}

pub async fn count_rows(store: &SqliteStore, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    let row: (i64,) = sqlx::query_as(&sql)
        .fetch_one(store.pool())
        .await
        .unwrap();
    row.0
}

pub async fn is_group_member(store: &SqliteStore, group_id: i64, contact_id: i64) -> bool {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM group_contacts WHERE group_id = ?1 AND contact_id = ?2",
    )
    .bind(group_id)
    .bind(contact_id)
    .fetch_one(store.pool())
    .await
    .unwrap();
    row.0 > 0
}
