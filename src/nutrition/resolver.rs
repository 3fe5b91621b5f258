use std::{sync::Arc, time::Duration};

use tracing::{debug, info, instrument, warn};

use super::{
    fallback, http_client,
    providers::{NutritionProvider, Nutritionix, OpenFoodFacts, ProviderError, Usda},
    record::NutritionRecord,
};
use crate::config::NutritionConfig;

/// Resolves free-text food descriptions into nutrition facts.
///
/// Providers are tried strictly in order; the first usable answer wins. When
/// every provider comes up empty the built-in table of common foods is
/// consulted, so `None` only means nothing anywhere matched.
pub struct NutritionResolver {
    providers: Vec<Arc<dyn NutritionProvider>>,
    step_timeout: Duration,
}

impl NutritionResolver {
    pub fn new(providers: Vec<Arc<dyn NutritionProvider>>, step_timeout: Duration) -> Self {
        Self {
            providers,
            step_timeout,
        }
    }

    /// Nutritionix, then USDA, then Open Food Facts.
    pub fn from_config(cfg: &NutritionConfig) -> anyhow::Result<Self> {
        let client = http_client::build_client(cfg.proxy_url.as_deref(), cfg.timeout_secs)?;
        let providers: Vec<Arc<dyn NutritionProvider>> = vec![
            Arc::new(Nutritionix::new(
                client.clone(),
                &cfg.nutritionix_base_url,
                cfg.nutritionix_app_id.clone(),
                cfg.nutritionix_app_key.clone(),
            )),
            Arc::new(Usda::new(client.clone(), &cfg.usda_base_url, &cfg.usda_api_key)),
            Arc::new(OpenFoodFacts::new(client, &cfg.open_food_facts_base_url)),
        ];
        Ok(Self::new(providers, Duration::from_secs(cfg.timeout_secs)))
    }

    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &str) -> Option<NutritionRecord> {
        for provider in &self.providers {
            if let Some(record) = self.try_resolve(provider.as_ref(), query).await {
                info!(provider = provider.name(), name = %record.name, "nutrition resolved");
                return Some(record);
            }
        }

        match fallback::lookup(query) {
            Some(record) => {
                info!(name = %record.name, "nutrition resolved from built-in table");
                Some(record)
            }
            None => {
                info!("no nutrition data found");
                None
            }
        }
    }

    /// Runs one provider, turning every failure into "no result".
    async fn try_resolve(
        &self,
        provider: &dyn NutritionProvider,
        query: &str,
    ) -> Option<NutritionRecord> {
        let name = provider.name();
        match tokio::time::timeout(self.step_timeout, provider.lookup(query)).await {
            Ok(Ok(Some(record))) => Some(record),
            Ok(Ok(None)) => {
                debug!(provider = name, "no usable match");
                None
            }
            Ok(Err(e @ ProviderError::NotConfigured(_))) => {
                debug!(provider = name, error = %e, "provider skipped");
                None
            }
            Ok(Err(e)) => {
                warn!(provider = name, error = %e, "provider lookup failed");
                None
            }
            Err(_) => {
                warn!(
                    provider = name,
                    timeout_ms = self.step_timeout.as_millis() as u64,
                    "provider lookup timed out"
                );
                None
            }
        }
    }
}
