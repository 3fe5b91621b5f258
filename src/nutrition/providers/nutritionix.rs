use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{read_json, NutritionProvider, ProviderError};
use crate::nutrition::record::{Nutrient, NutritionRecord, NutritionSource};

/// Micronutrients only reported through `full_nutrients` attribute ids.
const FULL_NUTRIENT_ATTRS: &[(u32, Nutrient)] = &[
    (301, Nutrient::Calcium),
    (303, Nutrient::Iron),
    (320, Nutrient::VitaminA),
    (401, Nutrient::VitaminC),
];

#[derive(Debug, Deserialize)]
struct NaturalResponse {
    #[serde(default)]
    foods: Vec<NaturalFood>,
}

#[derive(Debug, Deserialize)]
struct NaturalFood {
    food_name: String,
    nf_calories: Option<f64>,
    nf_protein: Option<f64>,
    nf_total_fat: Option<f64>,
    nf_total_carbohydrate: Option<f64>,
    nf_dietary_fiber: Option<f64>,
    nf_sugars: Option<f64>,
    nf_sodium: Option<f64>,
    nf_potassium: Option<f64>,
    nf_cholesterol: Option<f64>,
    nf_saturated_fat: Option<f64>,
    #[serde(default)]
    full_nutrients: Vec<FullNutrient>,
}

#[derive(Debug, Deserialize)]
struct FullNutrient {
    attr_id: u32,
    value: Option<f64>,
}

impl NaturalFood {
    fn into_record(self) -> NutritionRecord {
        let named = [
            (Nutrient::Calories, self.nf_calories),
            (Nutrient::Protein, self.nf_protein),
            (Nutrient::Fat, self.nf_total_fat),
            (Nutrient::Carbs, self.nf_total_carbohydrate),
            (Nutrient::Fiber, self.nf_dietary_fiber),
            (Nutrient::Sugar, self.nf_sugars),
            (Nutrient::Sodium, self.nf_sodium),
            (Nutrient::Potassium, self.nf_potassium),
            (Nutrient::Cholesterol, self.nf_cholesterol),
            (Nutrient::SaturatedFat, self.nf_saturated_fat),
        ];

        let mut record = NutritionRecord::empty(self.food_name, NutritionSource::Nutritionix);
        for (nutrient, value) in named {
            record.set(nutrient, value.unwrap_or(0.0));
        }
        for n in &self.full_nutrients {
            let mapped = FULL_NUTRIENT_ATTRS
                .iter()
                .find(|(attr, _)| *attr == n.attr_id)
                .map(|(_, nutrient)| *nutrient);
            if let (Some(nutrient), Some(value)) = (mapped, n.value) {
                record.set(nutrient, value);
            }
        }
        record
    }
}

/// Nutritionix natural-language nutrients endpoint.
pub struct Nutritionix {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl Nutritionix {
    pub fn new(client: Client, base_url: &str, app_id: Option<String>, app_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: app_id.zip(app_key),
        }
    }
}

#[async_trait]
impl NutritionProvider for Nutritionix {
    fn name(&self) -> &'static str {
        "nutritionix"
    }

    async fn lookup(&self, query: &str) -> Result<Option<NutritionRecord>, ProviderError> {
        let Some((app_id, app_key)) = &self.credentials else {
            return Err(ProviderError::NotConfigured("nutritionix"));
        };

        let resp = self
            .client
            .post(format!("{}/v2/natural/nutrients", self.base_url))
            .header("x-app-id", app_id)
            .header("x-app-key", app_key)
            .json(&json!({ "query": query }))
            .send()
            .await?;
        let body: NaturalResponse = read_json(resp).await?;

        Ok(body.foods.into_iter().next().map(NaturalFood::into_record))
    }
}
