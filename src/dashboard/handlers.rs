use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::{error, instrument};

use super::repo::{self, DailyCalories};
use crate::{
    app::INTERNAL_ERROR,
    auth::{extractors::AuthUser, repo_types::User},
    goals::repo::Goals,
    state::AppState,
    weights::repo::{self as weights, WeightEntry},
};

/// Window of the dashboard charts, in days.
const TREND_DAYS: i32 = 7;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub username: String,
    pub goals: Option<Goals>,
    pub total_meals: i64,
    /// Mean of the per-day calorie totals (not the per-meal mean), whole kcal.
    pub avg_daily_calories: i64,
    pub daily_calories: Vec<DailyCalories>,
    pub daily_weights: Vec<WeightEntry>,
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "dashboard query failed");
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
}

// Whole kcal, rounded toward zero.
fn whole_calories(avg: f64) -> i64 {
    avg.trunc() as i64
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DashboardResponse>, (StatusCode, String)> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    let goals = Goals::find(&state.db, user_id).await.map_err(internal)?;
    let total_meals = repo::meal_count(&state.db, user_id).await.map_err(internal)?;
    let avg = repo::average_daily_calories(&state.db, user_id)
        .await
        .map_err(internal)?;
    let daily_calories = repo::daily_calories(&state.db, user_id, TREND_DAYS)
        .await
        .map_err(internal)?;
    let daily_weights = weights::recent(&state.db, user_id, TREND_DAYS)
        .await
        .map_err(internal)?;

    Ok(Json(DashboardResponse {
        username: user.username,
        goals,
        total_meals,
        avg_daily_calories: whole_calories(avg),
        daily_calories,
        daily_weights,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_truncated_to_whole_calories() {
        assert_eq!(whole_calories(1999.9), 1999);
        assert_eq!(whole_calories(0.0), 0);
    }

    #[test]
    fn query_failure_body_is_generic() {
        let (status, body) = internal(anyhow::anyhow!("pool timed out while waiting for an open connection"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, INTERNAL_ERROR);
    }

    #[test]
    fn empty_dashboard_serializes() {
        let resp = DashboardResponse {
            username: "ced".into(),
            goals: None,
            total_meals: 0,
            avg_daily_calories: 0,
            daily_calories: vec![],
            daily_weights: vec![],
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["goals"], serde_json::Value::Null);
        assert_eq!(json["total_meals"], 0);
    }
}
