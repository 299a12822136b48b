use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    GoogleAds,
    MetaAds,
    MicrosoftAds,
    TiktokAds,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::GoogleAds => "google_ads",
            Platform::MetaAds => "meta_ads",
            Platform::MicrosoftAds => "microsoft_ads",
            Platform::TiktokAds => "tiktok_ads",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ad-platform account feeding spend into an [`AccountConfig`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct DataSourceRef {
    pub platform: Platform,
    pub external_account_id: String,
}

/// Budget settings of a managed account, as stored by the owning user.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct AccountConfig {
    pub id: Uuid,
    pub name: String,
    /// Unset means no pacing is computed for this account.
    pub monthly_budget: Option<f64>,
    /// Inclusive explicit period. Only used when both ends are set.
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub target_cost_per_conversion: Option<f64>,
    /// Spend entered by hand, used when no data source could be fetched.
    pub manual_spend: Option<f64>,
    #[serde(default)]
    pub data_source_refs: Vec<DataSourceRef>,
}

impl AccountConfig {
    pub fn explicit_period(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.period_start.zip(self.period_end)
    }

    pub fn has_budget(&self) -> bool {
        self.monthly_budget.is_some_and(|budget| budget > 0.0)
    }
}

/// User edit of the pacing-related fields of an account.
#[derive(Deserialize, Debug, Clone, Default, Validate, JsonSchema)]
#[validate(schema(function = "validate_period"))]
pub struct BudgetSettingsRequest {
    #[validate(range(min = 0.0))]
    pub monthly_budget: Option<f64>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    #[validate(range(min = 0.0))]
    pub target_cost_per_conversion: Option<f64>,
    #[validate(range(min = 0.0))]
    pub manual_spend: Option<f64>,
}

fn validate_period(request: &BudgetSettingsRequest) -> Result<(), ValidationError> {
    match (request.period_start, request.period_end) {
        (Some(start), Some(end)) if start > end => Err(ValidationError::new("period_start_must_not_be_after_period_end")),
        (Some(_), None) | (None, Some(_)) => Err(ValidationError::new("period_requires_both_start_and_end")),
        _ => Ok(()),
    }
}

impl BudgetSettingsRequest {
    pub fn apply_to(&self, account: &mut AccountConfig) {
        account.monthly_budget = self.monthly_budget;
        account.period_start = self.period_start;
        account.period_end = self.period_end;
        account.target_cost_per_conversion = self.target_cost_per_conversion;
        account.manual_spend = self.manual_spend;
    }
}
