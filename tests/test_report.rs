mod common;

use common::{spawn_search_api, SEARCH_BODY};
use dash_ml::analyzer::AnalyzerImpl;
use dash_ml::parser::MarketplaceParser;
use dash_ml::pipeline::run_query;
use dash_ml::report::{self, ReportOptions};
use dash_ml::scraper::ScraperImpl;

#[tokio::test]
async fn writes_html_and_terminal_reports() {
    let api = spawn_search_api(200, SEARCH_BODY).await;
    let scraper = ScraperImpl::new(&api.config()).unwrap();
    let view = run_query("Fone Bluetooth", "MLB", &scraper, &MarketplaceParser, &AnalyzerImpl).await;
    let opts = ReportOptions::new("R$");

    let text = report::terminal::render(&view, &opts);
    assert!(text.contains("Mean price:    R$ 83.33"));
    assert!(text.contains("AUDIO_SHOP | 2 products | +33%"));
    assert!(text.contains("BARATO | 1 products | -33%"));

    let dir = tempfile::tempdir().unwrap();
    let path = report::write_html_report(dir.path(), 0, &view, &opts).unwrap();
    assert_eq!(path.file_name().unwrap(), "dash-1-fone-bluetooth.html");

    let page = std::fs::read_to_string(&path).unwrap();
    assert!(page.contains("Data related to Fone Bluetooth"));
    assert!(page.contains(r#"<a href="http://item/1" target="_blank">"#));
    assert!(page.contains(r#"<progress max="12" value="12"></progress>"#));
    assert!(page.contains("66.67%"));
}
