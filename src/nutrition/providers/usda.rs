use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{read_json, NutritionProvider, ProviderError, SEARCH_PAGE_SIZE};
use crate::nutrition::record::{Nutrient, NutritionRecord, NutritionSource};

/// FoodData Central nutrient ids read from search results.
const USDA_NUTRIENT_IDS: &[(u32, Nutrient)] = &[
    (1008, Nutrient::Calories),
    (1003, Nutrient::Protein),
    (1004, Nutrient::Fat),
    (1005, Nutrient::Carbs),
    (1079, Nutrient::Fiber),
    (2000, Nutrient::Sugar),
    (1093, Nutrient::Sodium),
    (1087, Nutrient::Calcium),
    (1089, Nutrient::Iron),
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    description: String,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    nutrient_id: Option<u32>,
    value: Option<f64>,
}

impl SearchFood {
    /// `None` when the mapped energy is not positive.
    fn into_record(self) -> Option<NutritionRecord> {
        let mut record = NutritionRecord::empty(self.description, NutritionSource::Usda);
        for n in &self.food_nutrients {
            let (Some(id), Some(value)) = (n.nutrient_id, n.value) else {
                continue;
            };
            if let Some((_, nutrient)) = USDA_NUTRIENT_IDS.iter().find(|(known, _)| *known == id) {
                record.set(*nutrient, value);
            }
        }
        (record.calories > 0.0).then_some(record)
    }
}

/// USDA FoodData Central food search.
pub struct Usda {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Usda {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl NutritionProvider for Usda {
    fn name(&self) -> &'static str {
        "usda"
    }

    async fn lookup(&self, query: &str) -> Result<Option<NutritionRecord>, ProviderError> {
        let page_size = SEARCH_PAGE_SIZE.to_string();
        let resp = self
            .client
            .get(format!("{}/foods/search", self.base_url))
            .query(&[
                ("query", query),
                ("pageSize", page_size.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let body: SearchResponse = read_json(resp).await?;

        Ok(body
            .foods
            .into_iter()
            .next()
            .and_then(SearchFood::into_record))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::nutrition::providers::test_support::{client, spawn_stub};

    fn sample_payload() -> Value {
        json!({
            "totalHits": 2,
            "foods": [{
                "fdcId": 171477,
                "description": "Chicken, breast, meat only, cooked, roasted",
                "foodNutrients": [
                    { "nutrientId": 1003, "nutrientName": "Protein", "unitName": "G", "value": 31.02 },
                    { "nutrientId": 1004, "nutrientName": "Total lipid (fat)", "unitName": "G", "value": 3.57 },
                    { "nutrientId": 1005, "nutrientName": "Carbohydrate, by difference", "unitName": "G", "value": 0.0 },
                    { "nutrientId": 1008, "nutrientName": "Energy", "unitName": "KCAL", "value": 165.0 },
                    { "nutrientId": 1093, "nutrientName": "Sodium, Na", "unitName": "MG", "value": 74.0 },
                    { "nutrientId": 1092, "nutrientName": "Potassium, K", "unitName": "MG", "value": 256.0 },
                    { "nutrientId": 1089, "nutrientName": "Iron, Fe", "unitName": "MG", "value": 1.04 }
                ]
            }, {
                "fdcId": 1,
                "description": "second candidate",
                "foodNutrients": [{ "nutrientId": 1008, "value": 999.0 }]
            }]
        })
    }

    #[test]
    fn maps_known_nutrient_ids_only() {
        let body: SearchResponse = serde_json::from_value(sample_payload()).unwrap();
        let r = body.foods.into_iter().next().unwrap().into_record().unwrap();
        assert_eq!(r.name, "Chicken, breast, meat only, cooked, roasted");
        assert_eq!(r.calories, 165.0);
        assert_eq!(r.protein, 31.02);
        assert_eq!(r.fat, 3.57);
        assert_eq!(r.sodium, 74.0);
        assert_eq!(r.iron, 1.04);
        // potassium (1092) is not part of the mapped subset
        assert_eq!(r.potassium, 0.0);
        assert_eq!(r.source, NutritionSource::Usda);
    }

    #[test]
    fn zero_calorie_candidate_is_rejected() {
        let food: SearchFood = serde_json::from_value(json!({
            "description": "Water, tap",
            "foodNutrients": [
                { "nutrientId": 1008, "value": 0.0 },
                { "nutrientId": 1003, "value": 0.0 }
            ]
        }))
        .unwrap();
        assert!(food.into_record().is_none());
    }

    #[test]
    fn missing_energy_is_rejected() {
        let food: SearchFood = serde_json::from_value(json!({
            "description": "Almonds",
            "foodNutrients": [{ "nutrientId": 1003, "value": 21.0 }, { "value": 3.0 }]
        }))
        .unwrap();
        assert!(food.into_record().is_none());
    }

    #[tokio::test]
    async fn searches_with_small_page_and_api_key() {
        let app = Router::new().route(
            "/foods/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["query"], "chicken breast");
                assert_eq!(params["pageSize"], "5");
                assert_eq!(params["api_key"], "DEMO_KEY");
                Json(sample_payload())
            }),
        );
        let base = spawn_stub(app).await;
        let provider = Usda::new(client(), &base, "DEMO_KEY");

        let r = provider.lookup("chicken breast").await.unwrap().unwrap();
        assert_eq!(r.calories, 165.0);
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let app = Router::new().route("/foods/search", get(|| async { "<html>busy</html>" }));
        let base = spawn_stub(app).await;
        let provider = Usda::new(client(), &base, "k");
        let err = provider.lookup("rice").await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }
}
