mod common;

use common::{spawn_search_api, SEARCH_BODY};
use dash_ml::analyzer::AnalyzerImpl;
use dash_ml::model::{FetchError, SearchRequest};
use dash_ml::parser::MarketplaceParser;
use dash_ml::pipeline::{fetch_products, run_query, QueryView};
use dash_ml::scraper::{RetryingScraper, Scraper, ScraperImpl};
use std::time::Duration;

#[tokio::test]
async fn fetches_and_aggregates_search_results() {
    let api = spawn_search_api(200, SEARCH_BODY).await;
    let scraper = ScraperImpl::new(&api.config()).unwrap();

    let view = run_query("fone bluetooth", "MLB", &scraper, &MarketplaceParser, &AnalyzerImpl).await;
    let QueryView::Dashboard { query, stats } = view else {
        panic!("expected a dashboard");
    };

    assert_eq!(query, "fone bluetooth");
    // the listing without a seller nickname is skipped
    assert_eq!(stats.total_listings(), 3);
    let names: Vec<&str> = stats.listings.iter().map(|l| l.record.name.as_str()).collect();
    assert_eq!(names, ["Fone Bluetooth Pro", "Fone Bluetooth Lite", "Fone Basic"]);
    assert_eq!(stats.mean_price, 83.33);
    assert_eq!(stats.top_seller.seller_name, "AUDIO_SHOP");
    assert_eq!(stats.top_seller.deviation_pct, 33);
    assert_eq!(stats.max_available_quantity, 12);
    assert_eq!(stats.listings[2].record.available_quantity, 0);
    assert_eq!(stats.discounts.len(), 2);

    let lines = api.request_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("GET /sites/MLB/search?q=fone"), "{}", lines[0]);
    assert!(!lines[0].contains("fone bluetooth"));
}

#[tokio::test]
async fn upstream_500_fails_open_with_status() {
    let api = spawn_search_api(500, r#"{"message": "internal"}"#).await;
    let scraper = ScraperImpl::new(&api.config()).unwrap();
    let req = SearchRequest { query: "tv".into(), site_id: "MLB".into() };

    let outcome = fetch_products(&scraper, &MarketplaceParser, &req).await;
    assert!(outcome.records.is_empty());
    let err = outcome.error.expect("error reported");
    assert!(matches!(err, FetchError::UpstreamUnavailable { status: 500 }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn empty_results_render_no_results_state() {
    let api = spawn_search_api(200, r#"{"results": []}"#).await;
    let scraper = ScraperImpl::new(&api.config()).unwrap();

    let view = run_query("xyzzy", "MLB", &scraper, &MarketplaceParser, &AnalyzerImpl).await;
    assert!(matches!(view, QueryView::NoResults { .. }));
}

#[tokio::test]
async fn retrying_scraper_stops_after_budget() {
    let api = spawn_search_api(503, "{}").await;
    let scraper = RetryingScraper::new(
        ScraperImpl::new(&api.config()).unwrap(),
        2,
        Duration::from_millis(1),
    );
    let req = SearchRequest { query: "tv".into(), site_id: "MLB".into() };

    let err = scraper.fetch(&req).await.unwrap_err();
    assert!(matches!(err, FetchError::UpstreamUnavailable { status: 503 }));
    assert_eq!(api.request_lines().len(), 3);
}

#[tokio::test]
async fn connection_failure_is_reported_not_fatal() {
    let config = dash_ml::config::AppConfig {
        api_base: "http://127.0.0.1:1".into(),
        timeout_seconds: Some(2),
        ..Default::default()
    };
    let scraper = ScraperImpl::new(&config).unwrap();

    let view = run_query("tv", "MLB", &scraper, &MarketplaceParser, &AnalyzerImpl).await;
    assert!(matches!(view, QueryView::Failed { .. }));
}
