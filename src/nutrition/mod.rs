use crate::state::AppState;
use axum::Router;

mod fallback;
pub mod handlers;
pub mod http_client;
mod providers;
mod record;
mod resolver;

pub use record::{NutritionRecord, NutritionSource};
pub use resolver::NutritionResolver;

#[cfg(test)]
pub(crate) use providers::test_support;

/// Shown when the whole resolution chain comes up empty.
pub const NOT_FOUND_MESSAGE: &str = "No nutrition data found, try a more specific description.";

pub fn router() -> Router<AppState> {
    handlers::lookup_routes()
}
