use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{error, info, instrument};

use super::repo::{self, WeightEntry};
use crate::{app::INTERNAL_ERROR, auth::extractors::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct LogWeightRequest {
    pub weight: Option<f64>,
}

pub fn weight_routes() -> Router<AppState> {
    Router::new().route("/weights", post(log_weight))
}

fn validate_weight(weight: Option<f64>) -> Result<f64, (StatusCode, String)> {
    match weight {
        Some(w) if w.is_finite() && w > 0.0 => Ok(w),
        _ => Err((StatusCode::BAD_REQUEST, "Please enter a positive weight.".into())),
    }
}

/// POST /weights { weight } (one entry per day, later entries replace earlier ones)
#[instrument(skip(state))]
pub async fn log_weight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<LogWeightRequest>,
) -> Result<(StatusCode, Json<WeightEntry>), (StatusCode, String)> {
    let weight = validate_weight(body.weight)?;
    let today = OffsetDateTime::now_utc().date();

    let entry = repo::log_for_day(&state.db, user_id, weight, today)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "log weight failed");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
        })?;
    info!(%user_id, weight, "weight logged");
    Ok((StatusCode::CREATED, Json(entry)))
}
