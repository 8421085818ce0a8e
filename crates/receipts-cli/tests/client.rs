//! Integration tests for `ReceiptsClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! receipts service is needed.

use receipts_core::{Item, Receipt, ReceiptId};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use receipts_cli::{ClientError, ReceiptsClient};

fn test_client(base_url: &str) -> ReceiptsClient {
    ReceiptsClient::new(base_url, 5).expect("failed to build test ReceiptsClient")
}

fn simple_receipt() -> Receipt {
    Receipt {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-02".to_string(),
        purchase_time: "13:13".to_string(),
        items: vec![Item {
            short_description: "Pepsi - 12-oz".to_string(),
            price: "1.25".to_string(),
        }],
        total: "1.25".to_string(),
    }
}

#[tokio::test]
async fn process_receipt_posts_camel_case_body_and_returns_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/receipts/process"))
        .and(body_partial_json(json!({
            "retailer": "Target",
            "purchaseDate": "2022-01-02",
            "items": [{ "shortDescription": "Pepsi - 12-oz", "price": "1.25" }]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "7fb1377b-b223-49d9-a31a-5a02701dd310" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let id = test_client(&server.uri())
        .process_receipt(&simple_receipt())
        .await
        .expect("process_receipt should succeed");

    assert_eq!(id.as_str(), "7fb1377b-b223-49d9-a31a-5a02701dd310");
}

#[tokio::test]
async fn process_receipt_surfaces_rejection_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/receipts/process"))
        .respond_with(ResponseTemplate::new(400).set_body_string("missing required field"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .process_receipt(&Receipt::default())
        .await
        .expect_err("400 should be an error");

    assert!(
        matches!(err, ClientError::Status { status: 400, ref body } if body.contains("missing")),
        "expected Status(400), got: {err:?}"
    );
}

#[tokio::test]
async fn process_receipt_json_posts_body_unchanged() {
    let server = MockServer::start().await;
    // `total` is a number, which the service rejects but the client must not.
    let raw = r#"{"retailer":"Target","items":[],"total":1.25}"#;

    Mock::given(method("POST"))
        .and(path("/receipts/process"))
        .and(header("content-type", "application/json"))
        .and(body_string(raw))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid request payload"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .process_receipt_json(raw.as_bytes().to_vec())
        .await
        .expect_err("400 should be an error");

    assert!(
        matches!(err, ClientError::Status { status: 400, .. }),
        "expected Status(400), got: {err:?}"
    );
}

#[tokio::test]
async fn process_receipt_json_returns_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/receipts/process"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "abc-123" })))
        .expect(1)
        .mount(&server)
        .await;

    let id = test_client(&server.uri())
        .process_receipt_json(br#"{"retailer":"Target"}"#.to_vec())
        .await
        .expect("process_receipt_json should succeed");

    assert_eq!(id.as_str(), "abc-123");
}

#[tokio::test]
async fn process_receipt_rejects_response_without_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/receipts/process"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "receipt": "abc" })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .process_receipt(&simple_receipt())
        .await
        .expect_err("missing id should be an error");

    assert!(
        matches!(err, ClientError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn get_points_returns_points() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/receipts/abc-123/points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "points": 31 })))
        .expect(1)
        .mount(&server)
        .await;

    let points = test_client(&server.uri())
        .get_points(&ReceiptId::from("abc-123"))
        .await
        .expect("get_points should succeed");

    assert_eq!(points, 31);
}

#[tokio::test]
async fn get_points_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/receipts/missing/points"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_points(&ReceiptId::from("missing"))
        .await
        .expect_err("404 should be an error");

    assert!(
        matches!(err, ClientError::NotFound(ref id) if id == "missing"),
        "expected NotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn get_points_surfaces_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/receipts/abc/points"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_points(&ReceiptId::from("abc"))
        .await
        .expect_err("500 should be an error");

    assert!(
        matches!(err, ClientError::Status { status: 500, .. }),
        "expected Status(500), got: {err:?}"
    );
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/receipts/abc/points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "points": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let points = test_client(&format!("{}/api", server.uri()))
        .get_points(&ReceiptId::from("abc"))
        .await
        .expect("get_points should succeed");

    assert_eq!(points, 7);
}
