use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::dto::{AnalyzeMealRequest, CreateMealRequest, MealFilter, MealItem, MealsResponse};
use super::repo_types::{MacroTotals, MealRow};
use super::services::{parse_day, resolve_and_log, validate_meal_parts};
use crate::{
    app::INTERNAL_ERROR,
    auth::extractors::AuthUser,
    goals::repo::Goals,
    nutrition::{handlers::require_query, NOT_FOUND_MESSAGE},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/meals", get(list_meals))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal))
        .route("/meals/analyze", post(analyze_meal))
        .route("/meals/:id", delete(delete_meal))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "meal request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
}

fn created(row: MealRow) -> Result<(StatusCode, HeaderMap, Json<MealItem>), (StatusCode, String)> {
    let mut headers = HeaderMap::new();
    let location = HeaderValue::from_str(&format!("/api/v1/meals/{}", row.id)).map_err(internal)?;
    headers.insert(LOCATION, location);
    let item = MealItem::try_from(row).map_err(internal)?;
    Ok((StatusCode::CREATED, headers, Json(item)))
}

/// GET /meals?date=YYYY-MM-DD
#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(filter): Query<MealFilter>,
) -> Result<Json<MealsResponse>, (StatusCode, String)> {
    let day = match filter.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => Some(parse_day(raw)?),
        None => None,
    };

    let rows = MealRow::list_by_user(&state.db, user_id, day)
        .await
        .map_err(internal)?;
    let macro_totals = MacroTotals::for_user(&state.db, user_id, day)
        .await
        .map_err(internal)?;
    let macro_goals = Goals::find(&state.db, user_id)
        .await
        .map_err(internal)?
        .map(Into::into);

    let meals = rows
        .into_iter()
        .map(MealItem::try_from)
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(internal)?;

    Ok(Json(MealsResponse {
        meals,
        selected_date: day,
        macro_totals,
        macro_goals,
    }))
}

/// POST /meals { quantity, unit, food_name }
#[instrument(skip(state))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<MealItem>), (StatusCode, String)> {
    let parts = validate_meal_parts(&body)?;

    let row = resolve_and_log(
        &state,
        user_id,
        &parts.query(),
        Some(parts.quantity),
        Some(&parts.unit),
    )
    .await
    .map_err(internal)?
    .ok_or((StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()))?;

    created(row)
}

/// POST /meals/analyze { meal_name }
#[instrument(skip(state))]
pub async fn analyze_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AnalyzeMealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<MealItem>), (StatusCode, String)> {
    let query = require_query(&body.meal_name, "Please enter a meal name.")?;

    let row = resolve_and_log(&state, user_id, &query, None, None)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()))?;

    created(row)
}

/// DELETE /meals/:id
#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if MealRow::delete(&state.db, user_id, id).await.map_err(internal)? {
        info!(%user_id, meal_id = %id, "meal deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Meal not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use time::{macros::date, OffsetDateTime};

    use super::*;
    use crate::nutrition::NutritionSource;

    fn row(source: &str) -> MealRow {
        MealRow {
            id: Uuid::new_v4(),
            name: "Salmon".into(),
            calories: 208.0,
            protein: 20.0,
            fat: 12.0,
            carbs: 0.0,
            fiber: 0.0,
            sugar: 0.0,
            sodium: 59.0,
            potassium: 363.0,
            cholesterol: 55.0,
            saturated_fat: 3.1,
            calcium: 0.0,
            iron: 0.0,
            vitamin_a: 0.0,
            vitamin_c: 0.0,
            source: source.into(),
            quantity: None,
            unit: None,
            eaten_on: date!(2024 - 05 - 01),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn created_response_carries_location_and_record() {
        let r = row("generic");
        let id = r.id;
        let (status, headers, Json(item)) = created(r).unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(headers[LOCATION], format!("/api/v1/meals/{id}").as_str());
        assert_eq!(item.nutrition.source, NutritionSource::Generic);
        assert_eq!(item.nutrition.calories, 208.0);
    }

    #[test]
    fn meal_item_serializes_date_as_iso() {
        let item = MealItem::try_from(row("usda")).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["eaten_on"], "2024-05-01");
        assert_eq!(json["nutrition"]["source"], "usda");
    }

    #[test]
    fn internal_failures_hide_database_details() {
        let err = anyhow::anyhow!("relation \"meals\" does not exist").context("list meals");
        let (status, body) = internal(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal server error");
    }

    #[test]
    fn unknown_stored_source_is_an_error() {
        assert!(MealItem::try_from(row("spoonacular")).is_err());
    }
}
