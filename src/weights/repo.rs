use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeightEntry {
    pub logged_on: Date,
    pub weight: f64,
}

/// Records the weight for `day`, replacing any earlier entry for that day.
pub async fn log_for_day(
    db: &PgPool,
    user_id: Uuid,
    weight: f64,
    day: Date,
) -> anyhow::Result<WeightEntry> {
    let entry = sqlx::query_as::<_, WeightEntry>(
        r#"
        INSERT INTO weight_logs (user_id, weight, logged_on)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, logged_on) DO UPDATE SET weight = EXCLUDED.weight
        RETURNING logged_on, weight
        "#,
    )
    .bind(user_id)
    .bind(weight)
    .bind(day)
    .fetch_one(db)
    .await?;
    Ok(entry)
}

/// Entries from the last `days` days, oldest first.
pub async fn recent(db: &PgPool, user_id: Uuid, days: i32) -> anyhow::Result<Vec<WeightEntry>> {
    let rows = sqlx::query_as::<_, WeightEntry>(
        r#"
        SELECT logged_on, weight
          FROM weight_logs
         WHERE user_id = $1
           AND logged_on >= CURRENT_DATE - $2::int
         ORDER BY logged_on ASC
        "#,
    )
    .bind(user_id)
    .bind(days)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
