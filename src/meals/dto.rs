use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo_types::{MacroTotals, MealRow};
use crate::goals::repo::Goals;
use crate::nutrition::NutritionRecord;

/// POST /meals body; the three parts are joined into "{quantity} {unit} {food_name}".
#[derive(Debug, Default, Deserialize)]
pub struct CreateMealRequest {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub food_name: Option<String>,
}

/// POST /meals/analyze body: one free-text description.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeMealRequest {
    #[serde(default)]
    pub meal_name: String,
}

#[derive(Debug, Deserialize)]
pub struct MealFilter {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MealItem {
    pub id: Uuid,
    pub nutrition: NutritionRecord,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub eaten_on: Date,
    pub created_at: OffsetDateTime,
}

impl TryFrom<MealRow> for MealItem {
    type Error = anyhow::Error;

    fn try_from(row: MealRow) -> Result<Self, Self::Error> {
        let nutrition = row.nutrition()?;
        Ok(Self {
            id: row.id,
            nutrition,
            quantity: row.quantity,
            unit: row.unit,
            eaten_on: row.eaten_on,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Default, Serialize)]
pub struct MacroGoals {
    pub protein_goal: Option<f64>,
    pub carbs_goal: Option<f64>,
    pub fat_goal: Option<f64>,
}

impl From<Goals> for MacroGoals {
    fn from(g: Goals) -> Self {
        Self {
            protein_goal: g.protein_goal,
            carbs_goal: g.carbs_goal,
            fat_goal: g.fat_goal,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealsResponse {
    pub meals: Vec<MealItem>,
    pub selected_date: Option<Date>,
    pub macro_totals: MacroTotals,
    pub macro_goals: Option<MacroGoals>,
}
