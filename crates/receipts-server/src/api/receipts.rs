//! Receipt handlers.
//!
//! - `POST /receipts/process`     — score and store a receipt, return its id
//! - `GET  /receipts/{id}/points` — look up the points for a stored receipt

use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension,
};
use receipts_core::{score_receipt, Receipt, ReceiptId, ScoredReceipt, StoreError};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{json_response, ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct ProcessReceiptResponse {
    pub id: ReceiptId,
}

#[derive(Debug, Serialize)]
pub(super) struct PointsResponse {
    pub points: u64,
}

fn map_store_error(request_id: &str, error: &StoreError) -> ApiError {
    match error {
        StoreError::NotFound(id) => {
            ApiError::new(request_id, "not_found", format!("receipt '{id}' not found"))
        }
        StoreError::AlreadyExists(_) | StoreError::Unavailable(_) => {
            tracing::error!(error = %error, "receipt store operation failed");
            ApiError::new(request_id, "internal_error", "receipt store operation failed")
        }
    }
}

/// POST /receipts/process — validate, score, and store a receipt.
///
/// Any body that does not decode as a receipt is a 400, regardless of the
/// request's content type.
pub(super) async fn process_receipt(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<axum::response::Response, ApiError> {
    let rid = &req_id.0;

    let receipt: Receipt = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "rejected receipt: invalid JSON payload");
        ApiError::new(rid, "bad_request", "invalid request payload")
    })?;

    receipt.validate().map_err(|e| {
        tracing::warn!(error = %e, "rejected receipt: failed validation");
        ApiError::new(rid, "validation_error", e.to_string())
    })?;

    let breakdown = score_receipt(&receipt);
    let record = ScoredReceipt {
        id: ReceiptId::generate(),
        points: breakdown.total(),
    };
    tracing::debug!(receipt_id = %record.id, ?breakdown, "scored receipt");

    let id = record.id.clone();
    let points = record.points;
    state
        .store
        .put(record)
        .map_err(|e| map_store_error(rid, &e))?;
    tracing::info!(receipt_id = %id, points, "stored receipt");

    json_response(rid, &ProcessReceiptResponse { id })
}

/// GET /receipts/{id}/points — return the points awarded to a stored receipt.
pub(super) async fn get_receipt_points(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let rid = &req_id.0;
    let record = state
        .store
        .get(&ReceiptId::from(id))
        .map_err(|e| map_store_error(rid, &e))?;

    json_response(rid, &PointsResponse {
        points: record.points,
    })
}
