use crate::config::ConversionConfig;
use crate::error::app_error::SourceError;
use crate::models::account::{AccountConfig, Platform};
use crate::models::spend::{FetchWindow, RawSpendRow, SourcePartial, SpendSnapshot};
use crate::service::period::month_bounds;
use crate::source::SourceRegistry;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use uuid::Uuid;

/// Which typed actions count as conversions on each platform.
#[derive(Debug, Clone, Default)]
pub struct ConversionRules {
    action_types: HashMap<Platform, HashSet<String>>,
}

impl ConversionRules {
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self {
            action_types: config
                .action_types
                .iter()
                .map(|(platform, types)| (*platform, types.iter().cloned().collect()))
                .collect(),
        }
    }

    /// The row's own conversion count plus every configured action type it reports.
    pub fn row_conversions(&self, platform: Platform, row: &RawSpendRow) -> f64 {
        let counted = self.action_types.get(&platform);
        let from_actions: f64 = row
            .actions
            .iter()
            .filter(|action| counted.is_some_and(|types| types.contains(&action.action_type)))
            .map(|action| action.value)
            .sum();

        row.conversions + from_actions
    }
}

/// Date range to request for an account as of `today`.
///
/// The end is capped at `today` so no future rows are requested. Returns None when an
/// explicit period has not started yet.
pub fn fetch_window(account: &AccountConfig, today: NaiveDate) -> Option<FetchWindow> {
    let (start, end) = match account.explicit_period() {
        Some((start, end)) => (start, end.min(today)),
        None => (month_bounds(today).0, today),
    };

    (start <= end).then_some(FetchWindow { start, end })
}

pub fn partial_from_rows(platform: Platform, rows: &[RawSpendRow], rules: &ConversionRules) -> SourcePartial {
    rows.iter().fold(
        SourcePartial {
            platform,
            spend: 0.0,
            conversions: 0.0,
            daily_spend: BTreeMap::new(),
        },
        |mut partial, row| {
            partial.spend += row.spend;
            partial.conversions += rules.row_conversions(platform, row);
            *partial.daily_spend.entry(row.date).or_insert(0.0) += row.spend;
            partial
        },
    )
}

/// Folds per-source outcomes, in data source order, into a snapshot. Failed sources are logged and skipped.
pub fn fold_outcomes(account_id: &Uuid, mut outcomes: Vec<(usize, Result<SourcePartial, SourceError>)>) -> SpendSnapshot {
    outcomes.sort_by_key(|(index, _)| *index);

    outcomes
        .into_iter()
        .fold(SpendSnapshot::default(), |snapshot, (index, outcome)| match outcome {
            Ok(partial) => snapshot.merge(partial),
            Err(err) => {
                warn!(account_id = %account_id, source_index = index, error = %err, "data source fetch failed, skipping");
                snapshot.record_failure()
            }
        })
}

/// Fetches every data source of `account` concurrently and merges the results.
///
/// A failing source only lowers the totals. When no source succeeds the snapshot is empty and
/// `is_automatic` is false.
pub async fn aggregate_spend(account: &AccountConfig, registry: &SourceRegistry, rules: &Arc<ConversionRules>, today: NaiveDate) -> SpendSnapshot {
    let Some(window) = fetch_window(account, today) else {
        debug!(account_id = %account.id, "period has not started, nothing to fetch");
        return SpendSnapshot::default();
    };

    let mut outcomes = Vec::with_capacity(account.data_source_refs.len());
    let mut tasks = JoinSet::new();

    for (index, source_ref) in account.data_source_refs.iter().enumerate() {
        let platform = source_ref.platform;
        let Some(source) = registry.get(platform) else {
            outcomes.push((index, Err(SourceError::UnsupportedPlatform(platform))));
            continue;
        };

        let external_account_id = source_ref.external_account_id.clone();
        let rules = Arc::clone(rules);
        tasks.spawn(async move {
            let outcome = source
                .fetch(&external_account_id, window.start, window.end)
                .await
                .map(|rows| partial_from_rows(platform, &rows, &rules));
            (index, outcome)
        });
    }

    let mut panicked = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => panicked.push(SourceError::TaskFailed(err.to_string())),
        }
    }

    let snapshot = panicked.into_iter().fold(fold_outcomes(&account.id, outcomes), |snapshot, err| {
        warn!(account_id = %account.id, error = %err, "data source task aborted, skipping");
        snapshot.record_failure()
    });

    debug!(
        account_id = %account.id,
        total_spend = snapshot.total_spend,
        failed_sources = snapshot.failed_sources,
        is_automatic = snapshot.is_automatic,
        "aggregated spend"
    );
    snapshot
}

/// Spend and conversions to pace against: fetched totals when available, otherwise the manual figure.
pub fn effective_spend(account: &AccountConfig, snapshot: &SpendSnapshot) -> (f64, f64) {
    if snapshot.is_automatic {
        (snapshot.total_spend, snapshot.total_conversions)
    } else {
        (account.manual_spend.unwrap_or(0.0), 0.0)
    }
}
