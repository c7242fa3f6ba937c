// Tests for TradeDataFetcher against a mocked dataexim endpoint.
// Uses mockito for HTTP mocking.

use mockito::{Matcher, Server};

use bps_dataexim::fetch_error::FetchError;
use bps_dataexim::fetcher::{HsGranularity, PeriodKind, RequestParams, TradeDataFetcher};
use bps_dataexim::normalizer::TradeDirection;

fn test_params() -> RequestParams {
    RequestParams {
        direction: TradeDirection::Export,
        period: PeriodKind::Monthly,
        hs_codes: "2601".to_string(),
        granularity: HsGranularity::Full,
        year: "2019".to_string(),
        api_key: "test-key".to_string(),
    }
}

#[tokio::test]
async fn test_fetch_records_success() {
    let mut server = Server::new_async().await;

    let body = r#"{
        "status": "OK",
        "data": [
            {
                "kodehs": "[26011190] Iron ore",
                "bulan": "[03]",
                "tahun": 2019,
                "ctr": "China",
                "pod": "Tanjung Priok",
                "value": 1000000,
                "netweight": 50000
            }
        ]
    }"#;

    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("sumber".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let fetcher = TradeDataFetcher::new(server.url());
    let records = fetcher.fetch_records(&test_params()).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kodehs, "[26011190] Iron ore");
    assert_eq!(records[0].tahun, Some(2019));
    assert_eq!(records[0].value, 1_000_000.0);
    assert_eq!(records[0].netweight, 50_000.0);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_records_passes_all_query_params() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sumber".into(), "1".into()),
            Matcher::UrlEncoded("periode".into(), "1".into()),
            Matcher::UrlEncoded("kodehs".into(), "2601".into()),
            Matcher::UrlEncoded("jenishs".into(), "2".into()),
            Matcher::UrlEncoded("tahun".into(), "2019".into()),
            Matcher::UrlEncoded("key".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"data": []}"#)
        .create_async()
        .await;

    let fetcher = TradeDataFetcher::new(server.url());
    let records = fetcher.fetch_records(&test_params()).await.unwrap();

    assert!(records.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_records_http_error_carries_status_and_body() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("invalid api key")
        .create_async()
        .await;

    let fetcher = TradeDataFetcher::new(server.url());
    let result = fetcher.fetch_records(&test_params()).await;

    match result.unwrap_err() {
        FetchError::HttpStatus { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("Expected HttpStatus error, got {other:?}"),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_records_non_json_body() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance page</html>")
        .create_async()
        .await;

    let fetcher = TradeDataFetcher::new(server.url());
    let result = fetcher.fetch_records(&test_params()).await;

    match result.unwrap_err() {
        FetchError::InvalidJson(body) => {
            assert!(body.contains("maintenance page"));
        }
        other => panic!("Expected InvalidJson error, got {other:?}"),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_records_missing_data_key() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status": "Error", "message": "no results"}"#)
        .create_async()
        .await;

    let fetcher = TradeDataFetcher::new(server.url());
    let result = fetcher.fetch_records(&test_params()).await;

    assert!(matches!(result.unwrap_err(), FetchError::MissingData));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_records_string_year_in_payload() {
    let mut server = Server::new_async().await;

    let body = r#"{
        "data": [
            {
                "kodehs": "[10] Cereals",
                "bulan": "[01] Januari",
                "tahun": "2024",
                "ctr": "India",
                "pod": "Belawan",
                "value": 12.5,
                "netweight": 7.0
            }
        ]
    }"#;

    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let fetcher = TradeDataFetcher::new(server.url());
    let records = fetcher.fetch_records(&test_params()).await.unwrap();

    assert_eq!(records[0].tahun, Some(2024));
    mock.assert_async().await;
}
