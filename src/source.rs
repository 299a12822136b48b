use crate::error::app_error::SourceError;
use crate::models::account::Platform;
use crate::models::spend::RawSpendRow;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;

/// Query client for one ad platform.
///
/// Implementations return an empty row list for "no data" and an error only when the
/// platform could not be queried. Timeouts are the implementation's responsibility.
#[async_trait::async_trait]
pub trait SpendSource: Send + Sync {
    async fn fetch(&self, external_account_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawSpendRow>, SourceError>;
}

/// Fetchers keyed by platform. Cheap to clone.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: Arc<HashMap<Platform, Arc<dyn SpendSource>>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(self, platform: Platform, source: Arc<dyn SpendSource>) -> Self {
        let mut sources = Arc::unwrap_or_clone(self.sources);
        sources.insert(platform, source);
        Self { sources: Arc::new(sources) }
    }

    pub fn get(&self, platform: Platform) -> Option<Arc<dyn SpendSource>> {
        self.sources.get(&platform).cloned()
    }

    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.sources.keys().copied()
    }
}
