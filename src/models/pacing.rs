use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a reference date inside a budget period.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, JsonSchema)]
pub struct PeriodPosition {
    pub days_in_period: u32,
    pub day_of_period: u32,
}

impl PeriodPosition {
    pub fn days_remaining(&self) -> u32 {
        self.days_in_period.saturating_sub(self.day_of_period)
    }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PacingStatus {
    OnTrack,
    Under,
    Over,
    NoBudget,
}

impl PacingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PacingStatus::OnTrack => "on_track",
            PacingStatus::Under => "under",
            PacingStatus::Over => "over",
            PacingStatus::NoBudget => "no_budget",
        }
    }
}

impl fmt::Display for PacingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation label. Differs from [`PacingStatus`] only when an over-pace is offset by cost efficiency.
#[derive(Serialize, Debug, Copy, Clone, Eq, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PacingLabel {
    OnTrack,
    Under,
    Over,
    FavorableOver,
    NoBudget,
}

#[derive(Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct PacingRecord {
    pub budget: f64,
    pub spent: f64,
    pub ideal_spend: f64,
    pub forecasted_spend: f64,
    /// spent / ideal_spend, 0 when ideal_spend is 0
    pub pacing_ratio: f64,
    pub status: PacingStatus,
    pub days_in_period: u32,
    pub day_of_period: u32,
    pub days_remaining: u32,
    pub progress_percent: f64,
    pub daily_recommended_spend: f64,
    pub burn_rate: f64,
    pub remaining_budget: f64,
    pub actual_cost_per_conversion: Option<f64>,
    pub is_performance_good: bool,
}

impl PacingRecord {
    /// Even daily share of the budget.
    pub fn daily_budget(&self) -> f64 {
        if self.days_in_period > 0 {
            self.budget / f64::from(self.days_in_period)
        } else {
            0.0
        }
    }

    pub fn display_label(&self) -> PacingLabel {
        match self.status {
            PacingStatus::Over if self.is_performance_good => PacingLabel::FavorableOver,
            PacingStatus::Over => PacingLabel::Over,
            PacingStatus::Under => PacingLabel::Under,
            PacingStatus::OnTrack => PacingLabel::OnTrack,
            PacingStatus::NoBudget => PacingLabel::NoBudget,
        }
    }
}
