use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, info, instrument, warn};

use super::repo::Goals;
use crate::{app::INTERNAL_ERROR, auth::extractors::AuthUser, state::AppState};

pub fn goal_routes() -> Router<AppState> {
    Router::new().route("/goals", get(get_goals).put(put_goals))
}

#[instrument(skip(state))]
pub async fn get_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Option<Goals>>, (StatusCode, String)> {
    let goals = Goals::find(&state.db, user_id).await.map_err(|e| {
        error!(error = %e, %user_id, "load goals failed");
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
    })?;
    Ok(Json(goals))
}

#[instrument(skip(state, body))]
pub async fn put_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<Goals>,
) -> Result<Json<Goals>, (StatusCode, String)> {
    if let Some(field) = body.first_negative() {
        warn!(%user_id, field, "negative goal rejected");
        return Err((StatusCode::BAD_REQUEST, format!("{field} must not be negative")));
    }

    let saved = Goals::replace(&state.db, user_id, &body).await.map_err(|e| {
        error!(error = %e, %user_id, "save goals failed");
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
    })?;
    info!(%user_id, "goals updated");
    Ok(Json(saved))
}
