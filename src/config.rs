use crate::error::app_error::AppError;
use crate::models::account::Platform;
use chrono_tz::Tz;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub portfolio: PortfolioConfig,
    pub conversions: ConversionConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PortfolioConfig {
    /// IANA timezone used to derive "today" from the wall clock.
    pub timezone: String,
    /// Prefix used when rendering amounts in advisories.
    pub currency_symbol: String,
}

/// Action types counted as conversions, per platform.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConversionConfig {
    pub action_types: BTreeMap<Platform, Vec<String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            currency_symbol: "€".to_string(),
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        // Meta's aggregate action types already include their offsite_conversion.fb_pixel_* variants.
        let meta = ["purchase", "lead", "complete_registration"];

        Self {
            action_types: BTreeMap::from([(Platform::MetaAds, meta.iter().map(|s| s.to_string()).collect())]),
        }
    }
}

impl PortfolioConfig {
    pub fn tz(&self) -> Result<Tz, AppError> {
        self.timezone.parse::<Tz>().map_err(|_| AppError::InvalidTimezone(self.timezone.clone()))
    }
}

impl Config {
    /// Load configuration from multiple sources in priority order:
    /// 1. Built-in defaults
    /// 2. Pacing.toml (if present)
    /// 3. Environment variables prefixed with PACING_, nested with `__`
    ///    (e.g. PACING_LOGGING__JSON_FORMAT=true)
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::figment(Toml::file("Pacing.toml")).extract().map_err(AppError::from)
    }

    fn figment(file: impl figment::Provider) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(file)
            .merge(Env::prefixed("PACING_").split("__"))
    }
}
