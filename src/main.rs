mod app;
mod auth;
mod config;
mod dashboard;
mod goals;
mod meals;
mod nutrition;
mod state;
mod weights;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "cedhealth=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;

    sqlx::migrate!("./migrations")
        .run(&app_state.db)
        .await
        .map_err(|e| anyhow::anyhow!("database migration failed: {e}"))?;

    let nutrition = &app_state.config.nutrition;
    tracing::info!(
        nutritionix = nutrition.nutritionix_app_id.is_some() && nutrition.nutritionix_app_key.is_some(),
        timeout_secs = nutrition.timeout_secs,
        "nutrition providers configured"
    );

    let app = app::build_app(app_state);
    app::serve(app).await
}
