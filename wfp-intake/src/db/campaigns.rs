//! Campaign queries

use crate::models::CampaignId;
use sqlx::{Row, SqlitePool};

/// Campaign title, `None` when no such campaign exists
pub async fn title(pool: &SqlitePool, campaign_id: CampaignId) -> sqlx::Result<Option<String>> {
    let row = sqlx::query("SELECT title FROM campaigns WHERE id = ?1")
        .bind(campaign_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("title")))
}
