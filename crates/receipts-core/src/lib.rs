//! Receipt scoring and storage.
//!
//! [`calculate_points`] turns a [`Receipt`] into a point total; a
//! [`ReceiptStore`] keeps the resulting [`ScoredReceipt`] under a generated
//! [`ReceiptId`] for the lifetime of the process.

pub mod app_config;
pub mod config;
pub mod points;
pub mod receipt;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use points::{calculate_points, score_receipt, PointsBreakdown};
pub use receipt::{Item, Receipt, ReceiptError};
pub use store::{InMemoryReceiptStore, ReceiptId, ReceiptStore, ScoredReceipt, StoreError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
