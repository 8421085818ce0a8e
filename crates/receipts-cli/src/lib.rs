//! Client for the receipts points API.

pub mod client;
pub mod error;

pub use client::ReceiptsClient;
pub use error::ClientError;
