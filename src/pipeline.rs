// Fetch -> aggregate pipeline for a single query
use crate::analyzer::Analyzer;
use crate::model::{FetchOutcome, SearchRequest, Statistics};
use crate::parser::Parser;
use crate::scraper::Scraper;
use serde::Serialize;
use tracing::{info, warn};

/// What a single query renders as.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QueryView {
    /// Blank input: nothing was fetched.
    Prompt,
    Failed { query: String, message: String },
    NoResults { query: String },
    Dashboard { query: String, stats: Statistics },
}

/// Fetches and parses listings for `req`. Never fails: errors are carried in the outcome
/// alongside an empty record list.
pub async fn fetch_products(
    scraper: &dyn Scraper,
    parser: &dyn Parser,
    req: &SearchRequest,
) -> FetchOutcome {
    let body = match scraper.fetch(req).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Fetch failed for '{}': {}", req.query, e);
            return FetchOutcome::failed(e);
        }
    };

    match parser.parse(&body) {
        Ok(records) => FetchOutcome::ok(records),
        Err(e) => {
            warn!("Parse failed for '{}': {}", req.query, e);
            FetchOutcome::failed(e.into())
        }
    }
}

/// Runs one interaction from a clean slate. The analyzer only sees non-empty input.
pub async fn run_query(
    query: &str,
    site_id: &str,
    scraper: &dyn Scraper,
    parser: &dyn Parser,
    analyzer: &dyn Analyzer,
) -> QueryView {
    let query = query.trim();
    if query.is_empty() {
        return QueryView::Prompt;
    }

    info!("Searching '{}' on site {}", query, site_id);
    let req = SearchRequest {
        query: query.to_string(),
        site_id: site_id.to_string(),
    };

    let outcome = fetch_products(scraper, parser, &req).await;
    if let Some(e) = outcome.error {
        return QueryView::Failed { query: req.query, message: e.to_string() };
    }
    if outcome.records.is_empty() {
        info!("No results for '{}'", req.query);
        return QueryView::NoResults { query: req.query };
    }

    match analyzer.aggregate(&outcome.records) {
        Ok(stats) => {
            info!("Found {} listings for '{}'", stats.total_listings(), req.query);
            QueryView::Dashboard { query: req.query, stats }
        }
        Err(e) => {
            warn!("Aggregation skipped for '{}': {}", req.query, e);
            QueryView::NoResults { query: req.query }
        }
    }
}
