use crate::models::account::Platform;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A typed conversion-like action reported by platforms that break conversions down by action (Meta).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct ConversionAction {
    pub action_type: String,
    pub value: f64,
}

/// One row returned by a platform query: spend and conversions for a date and optional dimension.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct RawSpendRow {
    pub date: NaiveDate,
    pub dimension: Option<String>,
    pub spend: f64,
    #[serde(default)]
    pub conversions: f64,
    #[serde(default)]
    pub actions: Vec<ConversionAction>,
}

/// Inclusive date range requested from every data source of an account.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Spend and conversions contributed by a single successful data source fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePartial {
    pub platform: Platform,
    pub spend: f64,
    pub conversions: f64,
    pub daily_spend: BTreeMap<NaiveDate, f64>,
}

/// Merged view of every data source of one account. Recomputed on each refresh.
#[derive(Serialize, Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct SpendSnapshot {
    pub total_spend: f64,
    pub total_conversions: f64,
    pub platform_spend: BTreeMap<Platform, f64>,
    pub daily_spend: BTreeMap<NaiveDate, f64>,
    /// True iff at least one data source was fetched successfully.
    pub is_automatic: bool,
    pub failed_sources: usize,
}

impl SpendSnapshot {
    /// Folds one successful source into the snapshot.
    pub fn merge(mut self, partial: SourcePartial) -> Self {
        self.total_spend += partial.spend;
        self.total_conversions += partial.conversions;
        *self.platform_spend.entry(partial.platform).or_insert(0.0) += partial.spend;
        for (date, spend) in partial.daily_spend {
            *self.daily_spend.entry(date).or_insert(0.0) += spend;
        }
        self.is_automatic = !self.platform_spend.is_empty();
        self
    }

    pub fn record_failure(mut self) -> Self {
        self.failed_sources += 1;
        self
    }
}
