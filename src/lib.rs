pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod source;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use error::app_error::{AppError, SourceError};
pub use service::refresh::PortfolioService;
pub use source::{SourceRegistry, SpendSource};
pub use store::AccountConfigStore;

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// RUST_LOG takes precedence over `log_level` for fine-grained control, e.g.
/// `RUST_LOG=info,pacing_core::service::aggregator=debug`.
pub fn init_tracing(log_level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    if json_format {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
