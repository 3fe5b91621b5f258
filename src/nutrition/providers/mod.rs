//! External food databases queried by the resolver.
//!
//! Each provider speaks its own schema and maps it onto [`NutritionRecord`]
//! through a static field table, so schema churn stays inside the provider file.

mod nutritionix;
mod open_food_facts;
mod usda;

pub use nutritionix::Nutritionix;
pub use open_food_facts::OpenFoodFacts;
pub use usda::Usda;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::record::NutritionRecord;

/// Candidates requested from search-style providers.
pub(crate) const SEARCH_PAGE_SIZE: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0} credentials are not configured")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One step of the resolution chain.
///
/// `Ok(None)` means the provider answered but had nothing usable.
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn lookup(&self, query: &str) -> Result<Option<NutritionRecord>, ProviderError>;
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ProviderError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status));
    }
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
