use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{auth, dashboard, goals, meals, nutrition, weights};

/// Body of every 500 response; details go to the log only.
pub const INTERNAL_ERROR: &str = "Internal server error";

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(auth::router())
                .merge(goals::router())
                .merge(meals::router())
                .merge(nutrition::router())
                .merge(weights::router())
                .merge(dashboard::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::extract::FromRef;
    use serde_json::Value;

    use super::*;
    use crate::auth::services::JwtKeys;
    use crate::nutrition::test_support::spawn_stub;

    async fn spawn_app() -> (String, String) {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state)
            .sign_access(uuid::Uuid::new_v4())
            .unwrap();
        (spawn_stub(build_app(state)).await, token)
    }

    #[tokio::test]
    async fn health_is_public() {
        let (base, _) = spawn_app().await;
        let resp = reqwest::get(format!("{base}/api/v1/health")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(resp.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn food_lookup_requires_a_token() {
        let (base, _) = spawn_app().await;
        let resp = reqwest::get(format!("{base}/api/v1/foods/lookup?q=salmon"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn food_lookup_falls_back_to_builtin_table() {
        let (base, token) = spawn_app().await;
        let resp = reqwest::Client::new()
            .get(format!("{base}/api/v1/foods/lookup"))
            .query(&[("q", "salmon")])
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["name"], "Salmon");
        assert_eq!(body["calories"], 208.0);
        assert_eq!(body["protein"], 20.0);
        assert_eq!(body["fat"], 12.0);
        assert_eq!(body["carbs"], 0.0);
        assert_eq!(body["source"], "generic");
    }

    #[tokio::test]
    async fn blank_food_lookup_is_rejected() {
        let (base, token) = spawn_app().await;
        let resp = reqwest::Client::new()
            .get(format!("{base}/api/v1/foods/lookup?q=%20%20"))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_food_is_reported_as_not_found() {
        let (base, token) = spawn_app().await;
        let resp = reqwest::Client::new()
            .get(format!("{base}/api/v1/foods/lookup?q=zzqx"))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        assert_eq!(
            resp.text().await.unwrap(),
            crate::nutrition::NOT_FOUND_MESSAGE
        );
    }

    #[tokio::test]
    async fn blank_meal_name_is_rejected_before_resolution() {
        let (base, token) = spawn_app().await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/api/v1/meals/analyze"))
            .bearer_auth(&token)
            .json(&serde_json::json!({ "meal_name": "" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(resp.text().await.unwrap(), "Please enter a meal name.");
    }
}
