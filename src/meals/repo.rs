use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{MacroTotals, MealRow, NewMeal};

const MEAL_COLUMNS: &str = "id, name, calories, protein, fat, carbs, fiber, sugar, \
     sodium, potassium, cholesterol, saturated_fat, calcium, iron, vitamin_a, vitamin_c, \
     source, quantity, unit, eaten_on, created_at";

impl MealRow {
    pub async fn insert(db: &PgPool, user_id: Uuid, meal: &NewMeal<'_>) -> anyhow::Result<MealRow> {
        let r = meal.record;
        let sql = format!(
            r#"
            INSERT INTO meals (user_id, name, calories, protein, fat, carbs, fiber, sugar,
                               sodium, potassium, cholesterol, saturated_fat, calcium, iron,
                               vitamin_a, vitamin_c, source, quantity, unit, eaten_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING {MEAL_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, MealRow>(&sql)
            .bind(user_id)
            .bind(&r.name)
            .bind(r.calories)
            .bind(r.protein)
            .bind(r.fat)
            .bind(r.carbs)
            .bind(r.fiber)
            .bind(r.sugar)
            .bind(r.sodium)
            .bind(r.potassium)
            .bind(r.cholesterol)
            .bind(r.saturated_fat)
            .bind(r.calcium)
            .bind(r.iron)
            .bind(r.vitamin_a)
            .bind(r.vitamin_c)
            .bind(r.source.as_str())
            .bind(meal.quantity)
            .bind(meal.unit)
            .bind(meal.eaten_on)
            .fetch_one(db)
            .await
            .context("insert meal")?;
        Ok(row)
    }

    /// Meals of one user, newest first; `day` narrows to a single date.
    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        day: Option<Date>,
    ) -> anyhow::Result<Vec<MealRow>> {
        let sql = format!(
            r#"
            SELECT {MEAL_COLUMNS}
              FROM meals
             WHERE user_id = $1
               AND ($2::date IS NULL OR eaten_on = $2)
             ORDER BY eaten_on DESC, created_at DESC
            "#
        );
        let rows = sqlx::query_as::<_, MealRow>(&sql)
            .bind(user_id)
            .bind(day)
            .fetch_all(db)
            .await
            .context("list meals")?;
        Ok(rows)
    }

    /// Returns false when no meal of this user had that id.
    pub async fn delete(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM meals WHERE id = $1 AND user_id = $2"#)
            .bind(meal_id)
            .bind(user_id)
            .execute(db)
            .await
            .context("delete meal")?;
        Ok(res.rows_affected() > 0)
    }
}

impl MacroTotals {
    pub async fn for_user(db: &PgPool, user_id: Uuid, day: Option<Date>) -> anyhow::Result<MacroTotals> {
        let totals = sqlx::query_as::<_, MacroTotals>(
            r#"
            SELECT COALESCE(SUM(calories), 0) AS calories,
                   COALESCE(SUM(protein), 0)  AS protein,
                   COALESCE(SUM(carbs), 0)    AS carbs,
                   COALESCE(SUM(fat), 0)      AS fat
              FROM meals
             WHERE user_id = $1
               AND ($2::date IS NULL OR eaten_on = $2)
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(db)
        .await
        .context("sum meal macros")?;
        Ok(totals)
    }
}
