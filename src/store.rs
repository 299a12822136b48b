use crate::error::app_error::AppError;
use crate::models::account::{AccountConfig, BudgetSettingsRequest};
use uuid::Uuid;

/// The external account/client store owning [`AccountConfig`] records.
#[async_trait::async_trait]
pub trait AccountConfigStore: Send + Sync {
    async fn list_accounts(&self, user_id: &Uuid) -> Result<Vec<AccountConfig>, AppError>;

    /// Persists an already validated edit and returns the updated account.
    async fn update_budget_settings(&self, user_id: &Uuid, account_id: &Uuid, request: &BudgetSettingsRequest) -> Result<AccountConfig, AppError>;
}
