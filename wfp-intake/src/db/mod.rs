//! SQLite schema and per-entity query functions
//!
//! Each entity gets a module of free functions taking a `&SqlitePool`.
//! Functions return `sqlx::Result`; the store façade converts failures
//! into `StoreError` at the trait boundary.

pub mod activities;
pub mod campaigns;
pub mod contacts;
pub mod groups;
pub mod option_values;

use sqlx::SqlitePool;

/// Create all intake tables if they do not exist
pub async fn create_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_type TEXT NOT NULL,
            first_name TEXT,
            last_name TEXT,
            email TEXT,
            birth_date TEXT,
            legal_name TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            modified_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_contacts_email_type
         ON contacts (email, contact_type)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS option_values (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            option_group TEXT NOT NULL,
            name TEXT NOT NULL,
            label TEXT,
            description TEXT,
            UNIQUE (option_group, name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS groups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            title TEXT,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS group_contacts (
            group_id INTEGER NOT NULL,
            contact_id INTEGER NOT NULL,
            PRIMARY KEY (group_id, contact_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS campaigns (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            activity_type_id INTEGER NOT NULL,
            status_id INTEGER,
            source_contact_id INTEGER NOT NULL,
            target_contact_id INTEGER NOT NULL,
            campaign_id INTEGER,
            subject TEXT,
            activity_date_time TEXT NOT NULL,
            is_current_revision INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            is_test INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
