//! Contact queries
//!
//! Lookups return candidate rows ordered by id so multi-match handling
//! is deterministic regardless of engine row order.

use crate::models::{ContactId, IdentityAttributes};
use crate::store::ContactCandidate;
use sqlx::{Row, SqlitePool};

fn candidate_from_row(row: &sqlx::sqlite::SqliteRow) -> ContactCandidate {
    ContactCandidate {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        birth_date: row.get("birth_date"),
        modified_at: row.get("modified_at"),
    }
}

/// All contacts of `contact_type` holding `email`
pub async fn by_email(
    pool: &SqlitePool,
    email: &str,
    contact_type: &str,
) -> sqlx::Result<Vec<ContactCandidate>> {
    let rows = sqlx::query(
        "SELECT id, first_name, last_name, birth_date, modified_at
         FROM contacts
         WHERE email = ?1 AND contact_type = ?2
         ORDER BY id",
    )
    .bind(email)
    .bind(contact_type)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(candidate_from_row).collect())
}

/// Contacts matching the exact four-field identity
pub async fn by_name_and_email(
    pool: &SqlitePool,
    first_name: &str,
    last_name: &str,
    email: &str,
    contact_type: &str,
) -> sqlx::Result<Vec<ContactCandidate>> {
    let rows = sqlx::query(
        "SELECT id, first_name, last_name, birth_date, modified_at
         FROM contacts
         WHERE first_name = ?1 AND last_name = ?2 AND email = ?3 AND contact_type = ?4
         ORDER BY id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(contact_type)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(candidate_from_row).collect())
}

/// Insert an individual contact from submitted identity attributes
pub async fn create(pool: &SqlitePool, identity: &IdentityAttributes) -> sqlx::Result<ContactId> {
    let birth_date = identity.birth_date.map(|d| d.format("%Y-%m-%d").to_string());
    let result = sqlx::query(
        "INSERT INTO contacts (contact_type, first_name, last_name, email, birth_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&identity.contact_type)
    .bind(&identity.first_name)
    .bind(&identity.last_name)
    .bind(&identity.email)
    .bind(birth_date)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Organization contact by legal name
pub async fn find_organization(
    pool: &SqlitePool,
    legal_name: &str,
) -> sqlx::Result<Option<ContactId>> {
    let row = sqlx::query(
        "SELECT id FROM contacts
         WHERE contact_type = 'Organization' AND legal_name = ?1
         ORDER BY id LIMIT 1",
    )
    .bind(legal_name)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.get("id")))
}

/// Insert an organization contact
pub async fn create_organization(
    pool: &SqlitePool,
    legal_name: &str,
) -> sqlx::Result<ContactId> {
    let result = sqlx::query(
        "INSERT INTO contacts (contact_type, legal_name) VALUES ('Organization', ?1)",
    )
    .bind(legal_name)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}
