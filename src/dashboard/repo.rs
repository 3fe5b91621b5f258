use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailyCalories {
    pub day: Date,
    pub calories: f64,
}

pub async fn meal_count(db: &PgPool, user_id: Uuid) -> anyhow::Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM meals WHERE user_id = $1"#)
        .bind(user_id)
        .fetch_one(db)
        .await
        .context("count meals")?;
    Ok(count)
}

/// Mean of the per-day calorie totals over every day with at least one meal.
pub async fn average_daily_calories(db: &PgPool, user_id: Uuid) -> anyhow::Result<f64> {
    let avg = sqlx::query_scalar::<_, Option<f64>>(
        r#"
        SELECT AVG(day_total)
          FROM (SELECT SUM(calories) AS day_total
                  FROM meals
                 WHERE user_id = $1
                 GROUP BY eaten_on) per_day
        "#,
    )
    .bind(user_id)
    .fetch_one(db)
    .await
    .context("average daily calories")?;
    Ok(avg.unwrap_or(0.0))
}

/// Calories per day over the last `days` days, oldest first. Days without meals are absent.
pub async fn daily_calories(db: &PgPool, user_id: Uuid, days: i32) -> anyhow::Result<Vec<DailyCalories>> {
    let rows = sqlx::query_as::<_, DailyCalories>(
        r#"
        SELECT eaten_on AS day, SUM(calories) AS calories
          FROM meals
         WHERE user_id = $1
           AND eaten_on >= CURRENT_DATE - $2::int
         GROUP BY eaten_on
         ORDER BY eaten_on ASC
        "#,
    )
    .bind(user_id)
    .bind(days)
    .fetch_all(db)
    .await
    .context("daily calories")?;
    Ok(rows)
}
