//! Identifier-keyed storage for scored receipts.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Opaque identifier handed back to clients after a receipt is scored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    /// Generates a fresh random identifier, unrelated to receipt content.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ReceiptId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ReceiptId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The durable result of scoring one receipt. The receipt body itself is
/// not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredReceipt {
    pub id: ReceiptId,
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("receipt not found: {0}")]
    NotFound(ReceiptId),
    #[error("receipt already exists: {0}")]
    AlreadyExists(ReceiptId),
    #[error("receipt store unavailable: {0}")]
    Unavailable(String),
}

/// Concurrent-safe mapping from [`ReceiptId`] to [`ScoredReceipt`].
///
/// Implementations handle their own synchronization; callers share a store
/// behind an `Arc` and never lock it themselves.
pub trait ReceiptStore: Send + Sync {
    /// Inserts a new record. Existing records are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the id is already stored, or
    /// [`StoreError::Unavailable`] if the store cannot be accessed.
    fn put(&self, receipt: ScoredReceipt) -> Result<(), StoreError>;

    /// Looks up a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id was never stored, or
    /// [`StoreError::Unavailable`] if the store cannot be accessed.
    fn get(&self, id: &ReceiptId) -> Result<ScoredReceipt, StoreError>;

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be accessed.
    fn len(&self) -> Result<usize, StoreError>;

    /// Whether the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be accessed.
    fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }
}

/// Process-lifetime in-memory store. No eviction, no persistence.
#[derive(Debug, Default)]
pub struct InMemoryReceiptStore {
    receipts: RwLock<HashMap<ReceiptId, ScoredReceipt>>,
}

impl InMemoryReceiptStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl ReceiptStore for InMemoryReceiptStore {
    fn put(&self, receipt: ScoredReceipt) -> Result<(), StoreError> {
        let mut receipts = self.receipts.write().map_err(poisoned)?;
        if receipts.contains_key(&receipt.id) {
            return Err(StoreError::AlreadyExists(receipt.id));
        }
        receipts.insert(receipt.id.clone(), receipt);
        Ok(())
    }

    fn get(&self, id: &ReceiptId) -> Result<ScoredReceipt, StoreError> {
        let receipts = self.receipts.read().map_err(poisoned)?;
        receipts
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.receipts.read().map_err(poisoned)?.len())
    }
}
