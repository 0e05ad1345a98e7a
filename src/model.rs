// Core structs: ProductRecord, Statistics, SearchRequest and error types
use serde::Serialize;
use thiserror::Error;

/// One marketplace listing, flattened from a search result item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub name: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub thumbnail_url: String,
    pub available_quantity: u64,
    pub permalink: String,
    pub seller_name: String,
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub site_id: String,
}

/// Result of a fetch. Failures are reported, never propagated: `records` is
/// empty whenever `error` is set.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub records: Vec<ProductRecord>,
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    pub fn ok(records: Vec<ProductRecord>) -> Self {
        Self { records, error: None }
    }

    pub fn failed(error: FetchError) -> Self {
        Self { records: Vec::new(), error: Some(error) }
    }
}

/// A listing in price order together with its discount percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedListing {
    pub record: ProductRecord,
    pub discount_pct: i64,
}

/// `original_price - price` for a listing that carries an original price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountEntry {
    pub name: String,
    pub seller_name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerShare {
    pub seller_name: String,
    pub count: usize,
    pub percentage: f64,
}

/// Listing counts per seller, ordered by count descending (ties keep first appearance).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerTally {
    pub shares: Vec<SellerShare>,
    pub total_listings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerHighlight {
    pub seller_name: String,
    pub count: usize,
    /// Percentage deviation from the mean listings per seller, truncated toward zero.
    pub deviation_pct: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub listings: Vec<PricedListing>,
    pub mean_price: f64,
    pub most_expensive: ProductRecord,
    pub least_expensive: ProductRecord,
    pub discounts: Vec<DiscountEntry>,
    pub seller_tally: SellerTally,
    pub mean_listings_per_seller: f64,
    pub top_seller: SellerHighlight,
    pub bottom_seller: SellerHighlight,
    pub max_available_quantity: u64,
}

impl Statistics {
    pub fn total_listings(&self) -> usize {
        self.seller_tally.total_listings
    }

    pub fn seller_count(&self) -> usize {
        self.seller_tally.shares.len()
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error accessing the API: {status}")]
    UpstreamUnavailable { status: u16 },
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl FetchError {
    /// Transport failures and 5xx responses are worth another attempt; 4xx are not.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::UpstreamUnavailable { status } => *status >= 500,
            FetchError::Http(_) | FetchError::Timeout => true,
            FetchError::InvalidBody(_) => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("invalid field: {0}")]
    InvalidField(String),
}

impl From<ParserError> for FetchError {
    fn from(err: ParserError) -> Self {
        FetchError::InvalidBody(err.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("no listings to aggregate")]
    EmptyInput,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
