use crate::models::account::AccountConfig;
use crate::models::pacing::{PacingRecord, PacingStatus};
use crate::service::period::resolve_period;
use chrono::NaiveDate;

/// Ratio above which spend is considered ahead of the linear ideal.
pub const OVER_PACING_RATIO: f64 = 1.15;
/// Ratio below which spend is considered behind the linear ideal.
pub const UNDER_PACING_RATIO: f64 = 0.85;

/// Computes the full pacing record for one account. Never panics; degenerate denominators yield 0.
pub fn calculate_pacing(
    budget: f64,
    spent: f64,
    conversions: f64,
    target_cost_per_conversion: Option<f64>,
    today: NaiveDate,
    period_start: Option<NaiveDate>,
    period_end: Option<NaiveDate>,
) -> PacingRecord {
    let position = resolve_period(today, period_start, period_end);
    let days_in_period = f64::from(position.days_in_period);
    let day_of_period = f64::from(position.day_of_period);
    let days_remaining = position.days_remaining();

    let ideal_spend = budget / days_in_period * day_of_period;
    let forecasted_spend = if position.day_of_period > 0 {
        spent / day_of_period * days_in_period
    } else {
        0.0
    };
    let pacing_ratio = if ideal_spend > 0.0 { spent / ideal_spend } else { 0.0 };
    let progress_percent = if budget > 0.0 { (spent / budget * 100.0).clamp(0.0, 100.0) } else { 0.0 };
    let remaining_budget = (budget - spent).max(0.0);
    let daily_recommended_spend = if days_remaining > 0 {
        remaining_budget / f64::from(days_remaining)
    } else {
        0.0
    };
    let burn_rate = if position.day_of_period > 0 { spent / day_of_period } else { 0.0 };
    let actual_cost_per_conversion = (conversions > 0.0).then(|| spent / conversions);
    let is_performance_good = matches!(
        (target_cost_per_conversion, actual_cost_per_conversion),
        (Some(target), Some(actual)) if actual <= target
    );

    PacingRecord {
        budget,
        spent,
        ideal_spend,
        forecasted_spend,
        pacing_ratio,
        status: classify(budget, pacing_ratio),
        days_in_period: position.days_in_period,
        day_of_period: position.day_of_period,
        days_remaining,
        progress_percent,
        daily_recommended_spend,
        burn_rate,
        remaining_budget,
        actual_cost_per_conversion,
        is_performance_good,
    }
}

fn classify(budget: f64, pacing_ratio: f64) -> PacingStatus {
    if budget <= 0.0 {
        PacingStatus::NoBudget
    } else if pacing_ratio > OVER_PACING_RATIO {
        PacingStatus::Over
    } else if pacing_ratio < UNDER_PACING_RATIO {
        PacingStatus::Under
    } else {
        PacingStatus::OnTrack
    }
}

/// Pacing for a stored account, or None when no budget has been set.
pub fn pacing_for_account(account: &AccountConfig, spent: f64, conversions: f64, today: NaiveDate) -> Option<PacingRecord> {
    let budget = account.monthly_budget?;
    let (period_start, period_end) = account.explicit_period().unzip();

    Some(calculate_pacing(
        budget,
        spent,
        conversions,
        account.target_cost_per_conversion,
        today,
        period_start,
        period_end,
    ))
}
