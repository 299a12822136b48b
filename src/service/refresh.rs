use crate::config::Config;
use crate::error::app_error::AppError;
use crate::models::account::{AccountConfig, BudgetSettingsRequest};
use crate::models::portfolio::{AccountPacing, PortfolioView};
use crate::models::spend::SpendSnapshot;
use crate::service::aggregator::{ConversionRules, aggregate_spend, effective_spend};
use crate::service::alerts::generate_advisories;
use crate::service::pacing::pacing_for_account;
use crate::service::period::reference_date;
use crate::service::portfolio::summarize_portfolio;
use crate::source::SourceRegistry;
use crate::store::AccountConfigStore;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Runs portfolio refreshes against an account store and a set of platform fetchers.
///
/// Overlapping refreshes are not cancelled. Each one gets a generation number and callers keep
/// the view for which [`PortfolioService::is_latest`] holds.
pub struct PortfolioService<S: AccountConfigStore> {
    store: Arc<S>,
    sources: SourceRegistry,
    rules: Arc<ConversionRules>,
    timezone: Tz,
    currency_symbol: String,
    generation: AtomicU64,
}

impl<S: AccountConfigStore> PortfolioService<S> {
    pub fn new(store: Arc<S>, sources: SourceRegistry, config: &Config) -> Result<Self, AppError> {
        let timezone = config.portfolio.tz()?;
        info!(
            timezone = %timezone,
            platforms = ?sources.platforms().collect::<Vec<_>>(),
            "portfolio service ready"
        );

        Ok(Self {
            store,
            sources,
            rules: Arc::new(ConversionRules::from_config(&config.conversions)),
            timezone,
            currency_symbol: config.portfolio.currency_symbol.clone(),
            generation: AtomicU64::new(0),
        })
    }

    pub fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Refreshes the portfolio as of the current date in the configured timezone.
    pub async fn refresh_now(&self, user_id: &Uuid) -> Result<PortfolioView, AppError> {
        self.refresh(user_id, reference_date(Utc::now(), self.timezone)).await
    }

    /// Loads the user's accounts, aggregates all of them concurrently, then paces, summarizes and
    /// generates advisories once every aggregation has settled.
    pub async fn refresh(&self, user_id: &Uuid, today: NaiveDate) -> Result<PortfolioView, AppError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let accounts = self.store.list_accounts(user_id).await?;

        let snapshots = self.aggregate_all(&accounts, today).await;
        let accounts: Vec<AccountPacing> = accounts
            .into_iter()
            .zip(snapshots)
            .map(|(account, snapshot)| {
                let (spent, conversions) = effective_spend(&account, &snapshot);
                let pacing = pacing_for_account(&account, spent, conversions, today);
                AccountPacing { account, snapshot, pacing }
            })
            .collect();

        let summary = summarize_portfolio(&accounts);
        let advisories = generate_advisories(&accounts, &self.currency_symbol);

        info!(
            user_id = %user_id,
            generation,
            accounts = summary.account_count,
            over = summary.over_count,
            under = summary.under_count,
            no_budget = summary.no_budget_count,
            "portfolio refreshed"
        );

        Ok(PortfolioView {
            generation,
            accounts,
            summary,
            advisories,
        })
    }

    /// One snapshot per account, in input order.
    async fn aggregate_all(&self, accounts: &[AccountConfig], today: NaiveDate) -> Vec<SpendSnapshot> {
        let mut tasks = JoinSet::new();
        for (index, account) in accounts.iter().enumerate() {
            let account = account.clone();
            let sources = self.sources.clone();
            let rules = Arc::clone(&self.rules);
            tasks.spawn(async move { (index, aggregate_spend(&account, &sources, &rules, today).await) });
        }

        let mut snapshots = vec![SpendSnapshot::default(); accounts.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, snapshot)) => snapshots[index] = snapshot,
                Err(err) => warn!(error = %err, "account aggregation aborted, using empty snapshot"),
            }
        }

        snapshots
    }

    /// Validates an edit of an account's pacing settings before handing it to the store.
    pub async fn update_budget_settings(&self, user_id: &Uuid, account_id: &Uuid, request: &BudgetSettingsRequest) -> Result<AccountConfig, AppError> {
        request.validate()?;
        self.store.update_budget_settings(user_id, account_id, request).await
    }
}
