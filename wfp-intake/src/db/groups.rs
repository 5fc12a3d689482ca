//! Group and membership queries

use crate::models::{ContactId, GroupId};
use sqlx::{Row, SqlitePool};

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> sqlx::Result<Option<GroupId>> {
    let row = sqlx::query("SELECT id FROM groups WHERE name = ?1")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("id")))
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    title: &str,
    description: &str,
) -> sqlx::Result<GroupId> {
    let result = sqlx::query("INSERT INTO groups (name, title, description) VALUES (?1, ?2, ?3)")
        .bind(name)
        .bind(title)
        .bind(description)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Add a contact to a group; re-adding an existing member changes nothing
pub async fn add_member(
    pool: &SqlitePool,
    group_id: GroupId,
    contact_id: ContactId,
) -> sqlx::Result<()> {
    sqlx::query("INSERT OR IGNORE INTO group_contacts (group_id, contact_id) VALUES (?1, ?2)")
        .bind(group_id)
        .bind(contact_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove a contact from a group; removing a non-member changes nothing
pub async fn remove_member(
    pool: &SqlitePool,
    group_id: GroupId,
    contact_id: ContactId,
) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM group_contacts WHERE group_id = ?1 AND contact_id = ?2")
        .bind(group_id)
        .bind(contact_id)
        .execute(pool)
        .await?;

    Ok(())
}
