use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A user's targets. Every field is optional; unset targets are simply not tracked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Goals {
    pub weight_goal: Option<f64>,
    pub calorie_goal: Option<i32>,
    pub protein_goal: Option<f64>,
    pub carbs_goal: Option<f64>,
    pub fat_goal: Option<f64>,
}

impl Goals {
    /// Name of the first negative target, if any.
    pub fn first_negative(&self) -> Option<&'static str> {
        let fields = [
            ("weight_goal", self.weight_goal),
            ("calorie_goal", self.calorie_goal.map(f64::from)),
            ("protein_goal", self.protein_goal),
            ("carbs_goal", self.carbs_goal),
            ("fat_goal", self.fat_goal),
        ];
        fields
            .into_iter()
            .find(|(_, v)| v.is_some_and(|v| v < 0.0 || !v.is_finite()))
            .map(|(name, _)| name)
    }

    pub async fn find(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Goals>> {
        let goals = sqlx::query_as::<_, Goals>(
            r#"
            SELECT weight_goal, calorie_goal, protein_goal, carbs_goal, fat_goal
            FROM goals
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(goals)
    }

    /// Replaces the user's goals wholesale.
    pub async fn replace(db: &PgPool, user_id: Uuid, goals: &Goals) -> anyhow::Result<Goals> {
        let saved = sqlx::query_as::<_, Goals>(
            r#"
            INSERT INTO goals (user_id, weight_goal, calorie_goal, protein_goal, carbs_goal, fat_goal)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE
               SET weight_goal = EXCLUDED.weight_goal,
                   calorie_goal = EXCLUDED.calorie_goal,
                   protein_goal = EXCLUDED.protein_goal,
                   carbs_goal = EXCLUDED.carbs_goal,
                   fat_goal = EXCLUDED.fat_goal,
                   updated_at = now()
            RETURNING weight_goal, calorie_goal, protein_goal, carbs_goal, fat_goal
            "#,
        )
        .bind(user_id)
        .bind(goals.weight_goal)
        .bind(goals.calorie_goal)
        .bind(goals.protein_goal)
        .bind(goals.carbs_goal)
        .bind(goals.fat_goal)
        .fetch_one(db)
        .await?;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_unset() {
        let g: Goals = serde_json::from_str(r#"{"calorie_goal": 2200}"#).unwrap();
        assert_eq!(g.calorie_goal, Some(2200));
        assert!(g.weight_goal.is_none());
        assert!(g.first_negative().is_none());
    }

    #[test]
    fn negative_target_is_reported() {
        let g = Goals {
            protein_goal: Some(-5.0),
            ..Goals::default()
        };
        assert_eq!(g.first_negative(), Some("protein_goal"));
    }
}
