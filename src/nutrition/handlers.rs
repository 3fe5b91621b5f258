use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument};

use super::{NutritionRecord, NOT_FOUND_MESSAGE};
use crate::{auth::extractors::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub q: String,
}

pub fn lookup_routes() -> Router<AppState> {
    Router::new().route("/foods/lookup", get(lookup_food))
}

/// Trims a user-supplied food description, rejecting blank input with 400.
pub(crate) fn require_query(raw: &str, message: &str) -> Result<String, (StatusCode, String)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err((StatusCode::BAD_REQUEST, message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// GET /foods/lookup?q=banana (resolve only, nothing stored)
#[instrument(skip(state))]
pub async fn lookup_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<LookupParams>,
) -> Result<Json<NutritionRecord>, (StatusCode, String)> {
    let query = require_query(&params.q, "Please enter a food to look up.")?;

    match state.resolver.resolve(&query).await {
        Some(record) => Ok(Json(record)),
        None => {
            info!(%user_id, %query, "food lookup found nothing");
            Err((StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_is_rejected_before_resolution() {
        let (status, msg) = require_query("   ", "Please enter a meal name.").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "Please enter a meal name.");
        assert!(require_query("", "x").is_err());
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(require_query("  2 cups rice \n", "x").unwrap(), "2 cups rice");
    }
}
