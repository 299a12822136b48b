use crate::models::pacing::PacingStatus;
use crate::models::portfolio::{AccountPacing, PortfolioSummary};

/// Folds per-account pacing into portfolio totals.
///
/// Only accounts with a positive budget enter the sums and the average ratio; the others are
/// counted in `no_budget_count`.
pub fn summarize_portfolio(accounts: &[AccountPacing]) -> PortfolioSummary {
    let mut ratio_sum = 0.0;
    let mut included = 0usize;

    let mut summary = accounts.iter().fold(
        PortfolioSummary {
            account_count: accounts.len(),
            ..PortfolioSummary::default()
        },
        |mut summary, entry| {
            match entry.pacing.as_ref().filter(|record| record.status != PacingStatus::NoBudget) {
                Some(record) => {
                    summary.total_budget += record.budget;
                    summary.total_spent += record.spent;
                    summary.total_daily_recommended_spend += record.daily_recommended_spend;
                    ratio_sum += record.pacing_ratio;
                    included += 1;
                    match record.status {
                        PacingStatus::OnTrack => summary.on_track_count += 1,
                        PacingStatus::Over => summary.over_count += 1,
                        PacingStatus::Under => summary.under_count += 1,
                        PacingStatus::NoBudget => {}
                    }
                }
                None => summary.no_budget_count += 1,
            }
            summary
        },
    );

    summary.average_pacing_ratio = if included > 0 { ratio_sum / included as f64 } else { 0.0 };
    summary
}
