//! HTTP client for the receipts points API.
//!
//! Wraps `reqwest` with typed request/response bodies for the two receipt
//! endpoints and maps non-success statuses into [`ClientError`] variants.

use std::time::Duration;

use receipts_core::{Receipt, ReceiptId};
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Deserialize)]
struct ProcessReceiptResponse {
    id: ReceiptId,
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    points: u64,
}

/// Client for a running receipts service.
pub struct ReceiptsClient {
    client: Client,
    base_url: Url,
}

impl ReceiptsClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// A path prefix on the base URL is kept, so `http://host/api` sends
    /// requests to `http://host/api/receipts/...`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute URL with a path.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("receipts-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Submits a receipt for scoring and returns the id the service assigned.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Status`] if the service rejects the receipt.
    /// - [`ClientError::Deserialize`] if the response has no `id`.
    pub async fn process_receipt(&self, receipt: &Receipt) -> Result<ReceiptId, ClientError> {
        self.submit(|request| request.json(receipt)).await
    }

    /// Submits a JSON document exactly as given, without decoding it first.
    ///
    /// The service decides whether the body is a valid receipt.
    ///
    /// # Errors
    ///
    /// Same as [`ReceiptsClient::process_receipt`].
    pub async fn process_receipt_json(&self, body: Vec<u8>) -> Result<ReceiptId, ClientError> {
        self.submit(|request| request.header(CONTENT_TYPE, "application/json").body(body))
            .await
    }

    async fn submit(
        &self,
        with_body: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<ReceiptId, ClientError> {
        let url = self.endpoint(&["receipts", "process"]);
        let response = with_body(self.client.post(url.clone())).send().await?;
        let body = success_body(response).await?;

        let parsed: ProcessReceiptResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        Ok(parsed.id)
    }

    /// Looks up the points awarded to a previously submitted receipt.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] if the service does not know `id`.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Status`] on any other non-success status.
    /// - [`ClientError::Deserialize`] if the response has no `points`.
    pub async fn get_points(&self, id: &ReceiptId) -> Result<u64, ClientError> {
        let url = self.endpoint(&["receipts", id.as_str(), "points"]);
        let response = self.client.get(url.clone()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(id.to_string()));
        }
        let body = success_body(response).await?;

        let parsed: PointsResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        Ok(parsed.points)
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn success_body(response: Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
