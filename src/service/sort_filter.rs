use crate::models::pacing::PacingRecord;
use crate::models::portfolio::{AccountPacing, SortDirection, SortKey, StatusFilter};
use std::cmp::Ordering;

fn sort_value(record: &PacingRecord, key: SortKey) -> f64 {
    match key {
        SortKey::Budget => record.budget,
        SortKey::Spent => record.spent,
        SortKey::PacingRatio => record.pacing_ratio,
    }
}

/// Filters by status, then sorts by `key`. Accounts without a pacing record always come last.
pub fn sort_and_filter(accounts: &[AccountPacing], filter: StatusFilter, key: SortKey, direction: SortDirection) -> Vec<AccountPacing> {
    let mut selected: Vec<AccountPacing> = accounts.iter().filter(|entry| filter.matches(entry.status())).cloned().collect();

    selected.sort_by(|a, b| match (a.pacing.as_ref(), b.pacing.as_ref()) {
        (Some(a), Some(b)) => {
            let ordering = sort_value(a, key).total_cmp(&sort_value(b, key));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    selected
}
