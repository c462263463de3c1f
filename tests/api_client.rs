//! Contract tests for the backend API client against a mock server.

use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tradedesk::api::{AnalyzeRequest, ApiClient, ApiError};

async fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri()).unwrap()
}

#[tokio::test]
async fn prices_decode_in_symbol_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices"))
        .and(query_param("syms", "NVDA,AAPL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "NVDA": 875.25,
            "AAPL": 189.0
        })))
        .mount(&server)
        .await;

    let board = client(&server)
        .await
        .prices(&["NVDA".into(), "AAPL".into()])
        .await
        .unwrap();

    let symbols: Vec<_> = board.iter().map(|(s, _)| s.clone()).collect();
    assert_eq!(symbols, vec!["AAPL", "NVDA"]);
    assert_eq!(board.0["NVDA"], Some(dec!(875.25)));
}

#[tokio::test]
async fn prices_error_field_maps_to_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "market data offline"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .prices(&["AAPL".into()])
        .await
        .unwrap_err();

    match err {
        ApiError::Backend(message) => assert_eq!(message, "market data offline"),
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portfolio/profile"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).await.profile().await.unwrap_err();
    assert!(matches!(err, ApiError::Status(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn profile_decodes_with_optional_nickname() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portfolio/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "capital": 10000,
            "open_trades": 2,
            "pl_today": -12.5
        })))
        .mount(&server)
        .await;

    let profile = client(&server).await.profile().await.unwrap();
    assert_eq!(profile.capital, dec!(10000));
    assert_eq!(profile.open_trades, 2);
    assert_eq!(profile.pl_today, dec!(-12.5));
    assert_eq!(profile.nickname, None);
}

#[tokio::test]
async fn positions_tolerate_both_pl_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portfolio/positions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "positions": [
                {"symbol": "AAPL", "qty": 10, "avg": 100, "pl": 50},
                {"symbol": "NVDA", "qty": 2, "avg": 100, "price": 110}
            ]
        })))
        .mount(&server)
        .await;

    let response = client(&server).await.positions().await.unwrap();
    assert_eq!(response.positions.len(), 2);

    let raw = &response.positions[0];
    assert_eq!(raw.pl(), Some(dec!(50)));
    assert_eq!(raw.pl_percent(), Some(dec!(5)));

    let derived = &response.positions[1];
    assert_eq!(derived.pl(), Some(dec!(20)));
    assert_eq!(derived.pl_percent(), Some(dec!(10)));
}

#[tokio::test]
async fn notifications_decode_mixed_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"text": "Bought 2 AAPL"}, "engine restarted"])),
        )
        .mount(&server)
        .await;

    let items = client(&server).await.notifications().await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text(), "Bought 2 AAPL");
    assert_eq!(items[1].text(), "engine restarted");
}

#[tokio::test]
async fn telegram_status_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/telegram_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "last_active": "2026-08-27T10:00:00"
        })))
        .mount(&server)
        .await;

    let status = client(&server).await.telegram_status().await.unwrap();
    assert!(status.status);
    assert_eq!(status.last_active.as_deref(), Some("2026-08-27T10:00:00"));
}

#[tokio::test]
async fn analyze_posts_controls_and_reads_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_json(json!({
            "capital": 25000.0,
            "risk": "medium",
            "lev": 5,
            "inds": ["RSI", "MACD"],
            "llm": "gpt-4o"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"summary": "## Buy the dip"})),
        )
        .mount(&server)
        .await;

    let request = AnalyzeRequest {
        capital: dec!(25000),
        risk: Some("medium".into()),
        lev: Some(5),
        inds: vec!["RSI".into(), "MACD".into()],
        llm: Some("gpt-4o".into()),
    };

    let brief = client(&server).await.analyze(&request).await.unwrap();
    assert_eq!(brief.summary.as_deref(), Some("## Buy the dip"));
}

#[tokio::test]
async fn hourly_summary_tolerates_absent_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hourly_summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let brief = client(&server).await.hourly_summary().await.unwrap();
    assert_eq!(brief.summary, None);
}
