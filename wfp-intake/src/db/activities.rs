//! Activity queries
//!
//! The duplicate guard counts current, non-deleted, non-test rows on the
//! idempotence key. `campaign_id IS ?1` keeps the comparison NULL-safe so
//! activities without campaign linkage deduplicate against each other.

use crate::models::ActivityId;
use crate::store::{ActivityKey, NewActivity};
use sqlx::{Row, SqlitePool};

/// Count live activities matching the idempotence key
pub async fn count_matching(pool: &SqlitePool, key: &ActivityKey) -> sqlx::Result<u64> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS n FROM activities
         WHERE activity_type_id = ?1
           AND campaign_id IS ?2
           AND source_contact_id = ?3
           AND target_contact_id = ?4
           AND is_current_revision = 1
           AND is_deleted = 0
           AND is_test = 0",
    )
    .bind(key.activity_type_id)
    .bind(key.campaign_id)
    .bind(key.source_contact_id)
    .bind(key.target_contact_id)
    .fetch_one(pool)
    .await?;

    let n: i64 = row.get("n");
    Ok(n as u64)
}

/// Insert an activity row
pub async fn create(pool: &SqlitePool, activity: &NewActivity) -> sqlx::Result<ActivityId> {
    let stamp = activity
        .activity_date_time
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let result = sqlx::query(
        "INSERT INTO activities
         (activity_type_id, status_id, source_contact_id, target_contact_id,
          campaign_id, subject, activity_date_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(activity.activity_type_id)
    .bind(activity.status_id)
    .bind(activity.source_contact_id)
    .bind(activity.target_contact_id)
    .bind(activity.campaign_id)
    .bind(&activity.subject)
    .bind(stamp)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn test_pool() -> SqlitePool {
        let pool = wfp_common::db::open_memory_pool().await.unwrap();
        crate::db::create_schema(&pool).await.unwrap();
        pool
    }

    fn sample(campaign_id: Option<i64>) -> NewActivity {
        NewActivity {
            activity_type_id: 3,
            status_id: Some(2),
            source_contact_id: 1,
            target_contact_id: 5,
            campaign_id,
            subject: Some("Save the wetlands".to_string()),
            activity_date_time: Utc::now(),
        }
    }

    #[tokio::test]
    async fn count_sees_created_activity() {
        let pool = test_pool().await;
        let activity = sample(Some(42));
        assert_eq!(count_matching(&pool, &activity.key()).await.unwrap(), 0);

        create(&pool, &activity).await.unwrap();
        assert_eq!(count_matching(&pool, &activity.key()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn null_campaign_matches_null_campaign_only() {
        let pool = test_pool().await;
        create(&pool, &sample(None)).await.unwrap();

        assert_eq!(count_matching(&pool, &sample(None).key()).await.unwrap(), 1);
        assert_eq!(
            count_matching(&pool, &sample(Some(42)).key()).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn deleted_rows_do_not_count() {
        let pool = test_pool().await;
        let activity = sample(Some(42));
        let id = create(&pool, &activity).await.unwrap();
        sqlx::query("UPDATE activities SET is_deleted = 1 WHERE id = ?1")
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();

        assert_eq!(count_matching(&pool, &activity.key()).await.unwrap(), 0);
    }
}
