use anyhow::Context;
use axum::http::StatusCode;
use time::{macros::format_description, Date, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use super::dto::CreateMealRequest;
use super::repo_types::{MealRow, NewMeal};
use crate::state::AppState;

pub const MISSING_MEAL_PARTS: &str = "Please enter quantity, unit, and food name.";

/// Validated parts of a POST /meals request.
#[derive(Debug, Clone, PartialEq)]
pub struct MealParts {
    pub quantity: f64,
    pub unit: String,
    pub food_name: String,
}

impl MealParts {
    /// Free text handed to the resolver, e.g. "2 cups rice".
    pub fn query(&self) -> String {
        format!("{} {} {}", self.quantity, self.unit, self.food_name)
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

pub fn validate_meal_parts(req: &CreateMealRequest) -> Result<MealParts, (StatusCode, String)> {
    let missing = || (StatusCode::BAD_REQUEST, MISSING_MEAL_PARTS.to_string());

    let quantity = req.quantity.ok_or_else(missing)?;
    let unit = non_blank(req.unit.as_deref()).ok_or_else(missing)?;
    let food_name = non_blank(req.food_name.as_deref()).ok_or_else(missing)?;

    if !quantity.is_finite() || quantity <= 0.0 {
        return Err((StatusCode::BAD_REQUEST, "Quantity must be a positive number.".into()));
    }

    Ok(MealParts {
        quantity,
        unit,
        food_name,
    })
}

/// Parses a `YYYY-MM-DD` query parameter.
pub fn parse_day(raw: &str) -> Result<Date, (StatusCode, String)> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| (StatusCode::BAD_REQUEST, "date must be YYYY-MM-DD".into()))
}

/// Resolves `query` and stores the result as today's meal.
///
/// `Ok(None)` when no nutrition data was found; nothing is stored then.
pub async fn resolve_and_log(
    state: &AppState,
    user_id: Uuid,
    query: &str,
    quantity: Option<f64>,
    unit: Option<&str>,
) -> anyhow::Result<Option<MealRow>> {
    let Some(record) = state.resolver.resolve(query).await else {
        return Ok(None);
    };

    let meal = NewMeal {
        record: &record,
        quantity,
        unit,
        eaten_on: OffsetDateTime::now_utc().date(),
    };
    let row = MealRow::insert(&state.db, user_id, &meal)
        .await
        .with_context(|| format!("store meal {:?}", record.name))?;

    info!(%user_id, meal_id = %row.id, source = %record.source, "meal logged");
    Ok(Some(row))
}
