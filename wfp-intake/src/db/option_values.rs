//! Reference metadata (option value) queries

use sqlx::{Row, SqlitePool};

/// Option value id by `(option group, name)`
pub async fn find(
    pool: &SqlitePool,
    option_group: &str,
    name: &str,
) -> sqlx::Result<Option<i64>> {
    let row = sqlx::query("SELECT id FROM option_values WHERE option_group = ?1 AND name = ?2")
        .bind(option_group)
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("id")))
}

pub async fn create(
    pool: &SqlitePool,
    option_group: &str,
    name: &str,
    label: &str,
    description: &str,
) -> sqlx::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO option_values (option_group, name, label, description)
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(option_group)
    .bind(name)
    .bind(label)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}
