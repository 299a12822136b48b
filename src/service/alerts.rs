use crate::models::pacing::PacingStatus;
use crate::models::portfolio::{AccountPacing, Advisory, AdvisoryKind};

/// Scans the portfolio and emits advisories. Never returns an empty list.
pub fn generate_advisories(accounts: &[AccountPacing], currency_symbol: &str) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    let missing_budget = accounts.iter().filter(|entry| !entry.account.has_budget()).count();
    if missing_budget > 0 {
        let noun = if missing_budget == 1 { "account has" } else { "accounts have" };
        advisories.push(Advisory {
            kind: AdvisoryKind::MissingBudget,
            account_id: None,
            account_name: None,
            amount: Some(missing_budget as f64),
            message: format!("{missing_budget} {noun} no budget set"),
        });
    }

    for entry in accounts {
        let Some(record) = entry.pacing.as_ref().filter(|record| record.days_remaining > 0) else {
            continue;
        };

        let (kind, amount, verb) = match record.status {
            PacingStatus::Over => (AdvisoryKind::OverPacing, record.burn_rate - record.daily_budget(), "over-pacing"),
            PacingStatus::Under => (AdvisoryKind::UnderPacing, record.daily_budget() - record.burn_rate, "under-pacing"),
            PacingStatus::OnTrack | PacingStatus::NoBudget => continue,
        };
        let amount = amount.round();

        advisories.push(Advisory {
            kind,
            account_id: Some(entry.account.id),
            account_name: Some(entry.account.name.clone()),
            amount: Some(amount),
            message: format!("{} is {verb} by {currency_symbol}{amount:.0}/day", entry.account.name),
        });
    }

    if advisories.is_empty() {
        advisories.push(Advisory {
            kind: AdvisoryKind::AllHealthy,
            account_id: None,
            account_name: None,
            amount: None,
            message: "All accounts are pacing on track".to_string(),
        });
    }

    advisories
}
