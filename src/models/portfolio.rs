use crate::models::account::AccountConfig;
use crate::models::pacing::{PacingRecord, PacingStatus};
use crate::models::spend::SpendSnapshot;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account together with its freshly computed spend and pacing.
#[derive(Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct AccountPacing {
    pub account: AccountConfig,
    pub snapshot: SpendSnapshot,
    /// None when the account has no budget configured.
    pub pacing: Option<PacingRecord>,
}

impl AccountPacing {
    /// Accounts without a record are reported as `no_budget`.
    pub fn status(&self) -> PacingStatus {
        self.pacing.as_ref().map_or(PacingStatus::NoBudget, |record| record.status)
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct PortfolioSummary {
    pub account_count: usize,
    pub total_budget: f64,
    pub total_spent: f64,
    pub average_pacing_ratio: f64,
    pub on_track_count: usize,
    pub over_count: usize,
    pub under_count: usize,
    pub no_budget_count: usize,
    pub total_daily_recommended_spend: f64,
}

#[derive(Serialize, Debug, Copy, Clone, Eq, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    MissingBudget,
    OverPacing,
    UnderPacing,
    AllHealthy,
}

#[derive(Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub account_id: Option<Uuid>,
    pub account_name: Option<String>,
    /// Rounded to whole currency units. For missing budgets, the number of accounts.
    pub amount: Option<f64>,
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    OnTrack,
    Under,
    Over,
    NoBudget,
}

impl StatusFilter {
    pub fn matches(&self, status: PacingStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::OnTrack => status == PacingStatus::OnTrack,
            StatusFilter::Under => status == PacingStatus::Under,
            StatusFilter::Over => status == PacingStatus::Over,
            StatusFilter::NoBudget => status == PacingStatus::NoBudget,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Budget,
    Spent,
    #[default]
    PacingRatio,
}

#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Result of one portfolio refresh.
#[derive(Serialize, Debug, Clone, JsonSchema)]
pub struct PortfolioView {
    /// Increases with every refresh started by the same service.
    pub generation: u64,
    pub accounts: Vec<AccountPacing>,
    pub summary: PortfolioSummary,
    pub advisories: Vec<Advisory>,
}
