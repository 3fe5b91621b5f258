use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Endpoints and credentials of the external food databases.
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionConfig {
    pub nutritionix_app_id: Option<String>,
    pub nutritionix_app_key: Option<String>,
    pub nutritionix_base_url: String,
    pub usda_api_key: String,
    pub usda_base_url: String,
    pub open_food_facts_base_url: String,
    /// Per-provider bound, in seconds.
    pub timeout_secs: u64,
    pub proxy_url: Option<String>,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            nutritionix_app_id: None,
            nutritionix_app_key: None,
            nutritionix_base_url: "https://trackapi.nutritionix.com".into(),
            usda_api_key: "DEMO_KEY".into(),
            usda_base_url: "https://api.nal.usda.gov/fdc/v1".into(),
            open_food_facts_base_url: "https://world.openfoodfacts.org".into(),
            timeout_secs: 8,
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub nutrition: NutritionConfig,
}

// Unset and blank variables are treated alike.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_opt(key).and_then(|v| v.parse::<T>().ok())
}

impl NutritionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            nutritionix_app_id: env_opt("NUTRITIONIX_APP_ID"),
            nutritionix_app_key: env_opt("NUTRITIONIX_APP_KEY"),
            nutritionix_base_url: env_opt("NUTRITIONIX_BASE_URL")
                .unwrap_or(defaults.nutritionix_base_url),
            usda_api_key: env_opt("USDA_API_KEY").unwrap_or(defaults.usda_api_key),
            usda_base_url: env_opt("USDA_BASE_URL").unwrap_or(defaults.usda_base_url),
            open_food_facts_base_url: env_opt("OPEN_FOOD_FACTS_BASE_URL")
                .unwrap_or(defaults.open_food_facts_base_url),
            timeout_secs: env_parse::<u64>("NUTRITION_TIMEOUT_SECS")
                .filter(|s| *s > 0)
                .unwrap_or(defaults.timeout_secs),
            proxy_url: env_opt("HTTP_PROXY_URL"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "cedhealth".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "cedhealth-users".into()),
            ttl_minutes: env_parse::<i64>("JWT_TTL_MINUTES").unwrap_or(60),
            refresh_ttl_minutes: env_parse::<i64>("JWT_REFRESH_TTL_MINUTES").unwrap_or(60 * 24 * 14),
        };
        Ok(Self {
            database_url,
            jwt,
            nutrition: NutritionConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nutrition_defaults_point_at_public_endpoints() {
        let cfg = NutritionConfig::default();
        assert!(cfg.nutritionix_app_id.is_none());
        assert_eq!(cfg.usda_api_key, "DEMO_KEY");
        assert_eq!(cfg.usda_base_url, "https://api.nal.usda.gov/fdc/v1");
        assert_eq!(cfg.open_food_facts_base_url, "https://world.openfoodfacts.org");
        assert_eq!(cfg.timeout_secs, 8);
    }

    #[test]
    fn unset_variable_reads_as_none() {
        assert!(env_opt("CEDHEALTH_SURELY_UNSET_VARIABLE").is_none());
        assert!(env_parse::<u64>("CEDHEALTH_SURELY_UNSET_VARIABLE").is_none());
    }
}
