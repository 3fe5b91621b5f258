use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Which lookup produced a [`NutritionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionSource {
    Nutritionix,
    Usda,
    OpenFoodFacts,
    Generic,
}

impl NutritionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutritionSource::Nutritionix => "nutritionix",
            NutritionSource::Usda => "usda",
            NutritionSource::OpenFoodFacts => "open_food_facts",
            NutritionSource::Generic => "generic",
        }
    }
}

impl fmt::Display for NutritionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NutritionSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nutritionix" => Ok(NutritionSource::Nutritionix),
            "usda" => Ok(NutritionSource::Usda),
            "open_food_facts" => Ok(NutritionSource::OpenFoodFacts),
            "generic" => Ok(NutritionSource::Generic),
            other => anyhow::bail!("unknown nutrition source {other:?}"),
        }
    }
}

/// Addressable numeric fields of a record, used by the per-provider mapping tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Calories,
    Protein,
    Fat,
    Carbs,
    Fiber,
    Sugar,
    Sodium,
    Potassium,
    Cholesterol,
    SaturatedFat,
    Calcium,
    Iron,
    VitaminA,
    VitaminC,
}

/// Normalized nutrition facts for one food.
///
/// Units: energy in kcal; protein, fat, carbs, fiber, sugar and saturated fat in g;
/// sodium, potassium, cholesterol, calcium, iron and vitamin C in mg; vitamin A in µg RAE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
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
    pub source: NutritionSource,
}

impl NutritionRecord {
    /// A record with every nutrient at zero.
    pub fn empty(name: impl Into<String>, source: NutritionSource) -> Self {
        Self {
            name: name.into(),
            calories: 0.0,
            protein: 0.0,
            fat: 0.0,
            carbs: 0.0,
            fiber: 0.0,
            sugar: 0.0,
            sodium: 0.0,
            potassium: 0.0,
            cholesterol: 0.0,
            saturated_fat: 0.0,
            calcium: 0.0,
            iron: 0.0,
            vitamin_a: 0.0,
            vitamin_c: 0.0,
            source,
        }
    }

    fn slot(&mut self, nutrient: Nutrient) -> &mut f64 {
        match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fiber => &mut self.fiber,
            Nutrient::Sugar => &mut self.sugar,
            Nutrient::Sodium => &mut self.sodium,
            Nutrient::Potassium => &mut self.potassium,
            Nutrient::Cholesterol => &mut self.cholesterol,
            Nutrient::SaturatedFat => &mut self.saturated_fat,
            Nutrient::Calcium => &mut self.calcium,
            Nutrient::Iron => &mut self.iron,
            Nutrient::VitaminA => &mut self.vitamin_a,
            Nutrient::VitaminC => &mut self.vitamin_c,
        }
    }

    /// Stores `value`; non-finite input leaves the field untouched.
    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        if value.is_finite() {
            *self.slot(nutrient) = value;
        }
    }

    pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.set(nutrient, value);
        self
    }
}
