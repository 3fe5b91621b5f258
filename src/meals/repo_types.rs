use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::{NutritionRecord, NutritionSource};

/// A logged meal: the resolved nutrition record plus what the user asked for.
#[derive(Debug, Clone, FromRow)]
pub struct MealRow {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub potassium: f64,
    pub cholesterol: f64,
    pub saturated_fat: f64,
    pub calcium: f64,
    pub iron: f64,
    pub vitamin_a: f64,
    pub vitamin_c: f64,
    pub source: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub eaten_on: Date,
    pub created_at: OffsetDateTime,
}

impl MealRow {
    pub fn nutrition(&self) -> anyhow::Result<NutritionRecord> {
        Ok(NutritionRecord {
            name: self.name.clone(),
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            fiber: self.fiber,
            sugar: self.sugar,
            sodium: self.sodium,
            potassium: self.potassium,
            cholesterol: self.cholesterol,
            saturated_fat: self.saturated_fat,
            calcium: self.calcium,
            iron: self.iron,
            vitamin_a: self.vitamin_a,
            vitamin_c: self.vitamin_c,
            source: self.source.parse::<NutritionSource>()?,
        })
    }
}

/// Insert payload for a freshly resolved meal.
#[derive(Debug)]
pub struct NewMeal<'a> {
    pub record: &'a NutritionRecord,
    pub quantity: Option<f64>,
    pub unit: Option<&'a str>,
    pub eaten_on: Date,
}

/// Macro sums over a set of meals; empty sets sum to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, FromRow)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}
