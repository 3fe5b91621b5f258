use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{read_json, NutritionProvider, ProviderError, SEARCH_PAGE_SIZE};
use crate::nutrition::record::{Nutrient, NutritionRecord, NutritionSource};

const ENERGY_KEY: &str = "energy-kcal_100g";

/// Per-100g nutriment keys with the factor converting the reported unit
/// (grams for every mineral and vitamin) into the record's unit.
const NUTRIMENT_KEYS: &[(&str, Nutrient, f64)] = &[
    (ENERGY_KEY, Nutrient::Calories, 1.0),
    ("proteins_100g", Nutrient::Protein, 1.0),
    ("fat_100g", Nutrient::Fat, 1.0),
    ("carbohydrates_100g", Nutrient::Carbs, 1.0),
    ("fiber_100g", Nutrient::Fiber, 1.0),
    ("sugars_100g", Nutrient::Sugar, 1.0),
    ("sodium_100g", Nutrient::Sodium, 1_000.0),
    ("potassium_100g", Nutrient::Potassium, 1_000.0),
    ("cholesterol_100g", Nutrient::Cholesterol, 1_000.0),
    ("saturated-fat_100g", Nutrient::SaturatedFat, 1.0),
    ("calcium_100g", Nutrient::Calcium, 1_000.0),
    ("iron_100g", Nutrient::Iron, 1_000.0),
    ("vitamin-a_100g", Nutrient::VitaminA, 1_000_000.0),
    ("vitamin-c_100g", Nutrient::VitaminC, 1_000.0),
];

// Products stay raw so one malformed entry cannot sink the whole page.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Product {
    product_name: Option<String>,
    nutriments: Option<HashMap<String, Value>>,
}

// Values show up both as JSON numbers and as numeric strings.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

impl Product {
    fn nutriment(&self, key: &str) -> Option<f64> {
        self.nutriments.as_ref()?.get(key).and_then(numeric)
    }

    fn into_record(self, query: &str) -> NutritionRecord {
        let name = self
            .product_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(query)
            .to_string();
        let mut record = NutritionRecord::empty(name, NutritionSource::OpenFoodFacts);
        for &(key, nutrient, scale) in NUTRIMENT_KEYS {
            if let Some(value) = self.nutriment(key) {
                record.set(nutrient, value * scale);
            }
        }
        record
    }
}

/// Words URL-encoded and joined with `+`.
fn search_terms(query: &str) -> String {
    query
        .split_whitespace()
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

fn first_usable(products: Vec<Value>, query: &str) -> Option<NutritionRecord> {
    products
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<Product>(raw).ok())
        .find(|p| p.nutriment(ENERGY_KEY).is_some_and(|kcal| kcal > 0.0))
        .map(|p| p.into_record(query))
}

/// Open Food Facts product search.
pub struct OpenFoodFacts {
    client: Client,
    base_url: String,
}

impl OpenFoodFacts {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl NutritionProvider for OpenFoodFacts {
    fn name(&self) -> &'static str {
        "open_food_facts"
    }

    async fn lookup(&self, query: &str) -> Result<Option<NutritionRecord>, ProviderError> {
        let url = format!(
            "{}/cgi/search.pl?search_terms={}&search_simple=1&action=process&json=1&page_size={}",
            self.base_url,
            search_terms(query),
            SEARCH_PAGE_SIZE
        );
        let resp = self.client.get(url).send().await?;
        let body: SearchResponse = read_json(resp).await?;

        Ok(first_usable(body.products, query))
    }
}
