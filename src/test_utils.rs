use crate::error::app_error::{AppError, SourceError};
use crate::models::account::{AccountConfig, BudgetSettingsRequest, DataSourceRef, Platform};
use crate::models::spend::RawSpendRow;
use crate::source::SpendSource;
use crate::store::AccountConfigStore;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn row(date: NaiveDate, spend: f64, conversions: f64) -> RawSpendRow {
    RawSpendRow {
        date,
        dimension: None,
        spend,
        conversions,
        actions: Vec::new(),
    }
}

pub fn sample_account() -> AccountConfig {
    AccountConfig {
        id: Uuid::new_v4(),
        name: "Acme Shoes".to_string(),
        monthly_budget: Some(3000.0),
        data_source_refs: vec![
            DataSourceRef {
                platform: Platform::GoogleAds,
                external_account_id: "google-1".to_string(),
            },
            DataSourceRef {
                platform: Platform::MetaAds,
                external_account_id: "meta-1".to_string(),
            },
        ],
        ..AccountConfig::default()
    }
}

/// Returns the same rows for every account and counts calls.
pub struct StaticSource {
    rows: Vec<RawSpendRow>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(rows: Vec<RawSpendRow>) -> Self {
        Self {
            rows,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SpendSource for StaticSource {
    async fn fetch(&self, _external_account_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawSpendRow>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.iter().filter(|row| row.date >= start && row.date <= end).cloned().collect())
    }
}

pub struct FailingSource {
    platform: Platform,
}

impl FailingSource {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

#[async_trait::async_trait]
impl SpendSource for FailingSource {
    async fn fetch(&self, _external_account_id: &str, _start: NaiveDate, _end: NaiveDate) -> Result<Vec<RawSpendRow>, SourceError> {
        Err(SourceError::request_failed(self.platform, "connection reset"))
    }
}

/// Waits before returning its rows, like a platform with a slow report endpoint.
pub struct SlowSource {
    delay: Duration,
    rows: Vec<RawSpendRow>,
}

impl SlowSource {
    pub fn new(delay: Duration, rows: Vec<RawSpendRow>) -> Self {
        Self { delay, rows }
    }
}

#[async_trait::async_trait]
impl SpendSource for SlowSource {
    async fn fetch(&self, _external_account_id: &str, _start: NaiveDate, _end: NaiveDate) -> Result<Vec<RawSpendRow>, SourceError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.rows.clone())
    }
}

pub struct PanickingSource;

#[async_trait::async_trait]
impl SpendSource for PanickingSource {
    async fn fetch(&self, _external_account_id: &str, _start: NaiveDate, _end: NaiveDate) -> Result<Vec<RawSpendRow>, SourceError> {
        panic!("malformed platform response")
    }
}

/// In-memory account store keyed by owner.
#[derive(Default)]
pub struct MockStore {
    accounts: Mutex<Vec<(Uuid, AccountConfig)>>,
    unavailable: AtomicBool,
}

impl MockStore {
    pub fn with_accounts(user_id: Uuid, accounts: Vec<AccountConfig>) -> Self {
        Self {
            accounts: Mutex::new(accounts.into_iter().map(|account| (user_id, account)).collect()),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Makes every following call fail with a store error.
    pub fn set_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::store("connection refused"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AccountConfigStore for MockStore {
    async fn list_accounts(&self, user_id: &Uuid) -> Result<Vec<AccountConfig>, AppError> {
        self.check_available()?;
        let accounts = self.accounts.lock().await;
        Ok(accounts.iter().filter(|(owner, _)| owner == user_id).map(|(_, account)| account.clone()).collect())
    }

    async fn update_budget_settings(&self, user_id: &Uuid, account_id: &Uuid, request: &BudgetSettingsRequest) -> Result<AccountConfig, AppError> {
        self.check_available()?;
        let mut accounts = self.accounts.lock().await;
        let (_, account) = accounts
            .iter_mut()
            .find(|(owner, account)| owner == user_id && account.id == *account_id)
            .ok_or(AppError::AccountNotFound(*account_id))?;
        request.apply_to(account);
        Ok(account.clone())
    }
}
