//! Contract tests for the Alpha Vantage adapter over a real HTTP stack
//!
//! A local mock server plays Alpha Vantage; requests go through reqwest.

use std::sync::Arc;
use std::time::Duration;

use stockc_core::{
    AlphaVantageAdapter, HistorySource, MarketDataService, MarketDataSource, ReqwestHttpClient,
    ServiceConfig, SourceErrorKind, Symbol,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAILY_BODY: &str = r#"{
    "Meta Data": {
        "1. Information": "Daily Prices (open, high, low, close) and Volumes",
        "2. Symbol": "IBM"
    },
    "Time Series (Daily)": {
        "2026-02-02": {"1. open": "258.0", "2. high": "261.0", "3. low": "257.5", "4. close": "259.40", "5. volume": "100"},
        "2026-01-30": {"1. open": "257.0", "2. high": "261.0", "3. low": "256.0", "4. close": "260.05", "5. volume": "100"},
        "2026-01-29": {"1. open": "258.0", "2. high": "259.0", "3. low": "255.0", "4. close": "256.44", "5. volume": "100"},
        "2026-01-28": {"1. open": "253.0", "2. high": "259.0", "3. low": "252.0", "4. close": "258.27", "5. volume": "100"},
        "2026-01-27": {"1. open": "250.0", "2. high": "253.0", "3. low": "249.0", "4. close": "252.10", "5. volume": "100"}
    }
}"#;

const QUOTE_BODY: &str = r#"{
    "Global Quote": {
        "01. symbol": "IBM",
        "02. open": "258.0000",
        "05. price": "259.4000",
        "08. previous close": "260.0500",
        "09. change": "-0.6500",
        "10. change percent": "-0.2500%"
    }
}"#;

fn config_for(server: &MockServer) -> ServiceConfig {
    ServiceConfig::default()
        .with_api_key(Some(String::from("contract-key")))
        .with_base_url(format!("{}/query", server.uri()))
}

fn adapter_for(server: &MockServer) -> AlphaVantageAdapter {
    AlphaVantageAdapter::new(Arc::new(ReqwestHttpClient::new()), &config_for(server))
}

fn symbol(value: &str) -> Symbol {
    Symbol::parse(value).expect("valid symbol")
}

#[tokio::test]
async fn daily_history_request_and_response_follow_provider_contract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "TIME_SERIES_DAILY"))
        .and(query_param("symbol", "IBM"))
        .and(query_param("apikey", "contract-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DAILY_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let series = adapter_for(&server)
        .fetch_daily_history(&symbol("IBM"))
        .await
        .expect("history parses");

    assert_eq!(series.symbol.as_str(), "IBM");
    assert_eq!(series.len(), 5);
    assert_eq!(series.series[0].date.format_iso(), "2026-02-02");
    assert_eq!(series.series[0].price, 259.40);
    assert_eq!(series.series[4].price, 252.10);
}

#[tokio::test]
async fn global_quote_request_and_response_follow_provider_contract() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "GLOBAL_QUOTE"))
        .and(query_param("symbol", "IBM"))
        .respond_with(ResponseTemplate::new(200).set_body_string(QUOTE_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let quote = adapter_for(&server)
        .fetch_quote(&symbol("IBM"))
        .await
        .expect("quote parses");

    assert_eq!(quote.price, 259.4);
    assert_eq!(quote.change, -0.65);
    assert_eq!(quote.change_percent, -0.25);
}

#[tokio::test]
async fn symbol_is_url_encoded_in_the_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("symbol", "BRK-B"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DAILY_BODY))
        .expect(1)
        .mount(&server)
        .await;

    adapter_for(&server)
        .fetch_daily_history(&symbol("brk-b"))
        .await
        .expect("history parses");
}

#[tokio::test]
async fn throttle_note_is_classified_as_upstream_temporary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#,
        ))
        .mount(&server)
        .await;

    let error = adapter_for(&server)
        .fetch_daily_history(&symbol("IBM"))
        .await
        .expect_err("throttle note must fail");

    assert_eq!(error.kind(), SourceErrorKind::UpstreamTemporary);
    assert_eq!(error.status_code(), 429);
}

#[tokio::test]
async fn server_error_status_is_classified_as_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("{}"))
        .mount(&server)
        .await;

    let error = adapter_for(&server)
        .fetch_quote(&symbol("IBM"))
        .await
        .expect_err("500 must fail");

    assert_eq!(error.kind(), SourceErrorKind::Transport);
    assert_eq!(error.status_code(), 502);
}

#[tokio::test]
async fn slow_provider_times_out_as_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(DAILY_BODY)
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout_ms(50);
    let adapter = AlphaVantageAdapter::new(Arc::new(ReqwestHttpClient::new()), &config);

    let error = adapter
        .fetch_daily_history(&symbol("IBM"))
        .await
        .expect_err("timeout must fail");
    assert_eq!(error.kind(), SourceErrorKind::Transport);
}

#[tokio::test]
async fn service_fetches_once_then_serves_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("function", "TIME_SERIES_DAILY"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DAILY_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let service = MarketDataService::from_config(&config_for(&server));

    let first = service
        .get_history(&symbol("IBM"), None)
        .await
        .expect("history resolves");
    let second = service
        .get_history(&symbol("IBM"), None)
        .await
        .expect("history resolves");

    assert_eq!(first.source, HistorySource::Live);
    assert_eq!(second.source, HistorySource::Cache);
    assert_eq!(first.series, second.series);
    assert_eq!(first.fetched_at, second.fetched_at);
}

#[tokio::test]
async fn service_serves_demo_when_provider_is_throttling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"Information": "API rate limit reached"}"#),
        )
        .mount(&server)
        .await;

    let service = MarketDataService::from_config(&config_for(&server));
    let history = service
        .get_history(&symbol("IBM"), None)
        .await
        .expect("demo resolves");

    assert_eq!(history.source, HistorySource::Demo);
    assert_eq!(history.series.symbol.as_str(), "AAPL");
}
