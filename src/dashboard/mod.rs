use crate::state::AppState;
use axum::Router;

mod handlers;
mod repo;

pub fn router() -> Router<AppState> {
    handlers::dashboard_routes()
}
