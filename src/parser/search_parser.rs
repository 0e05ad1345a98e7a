// Mercado Livre search response parsing
use crate::model::{ParserError, ProductRecord};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

pub trait Parser: Send + Sync {
    fn parse(&self, body: &str) -> Result<Vec<ProductRecord>, ParserError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

/// Raw result item. Every optional upstream field is explicit:
/// `original_price` stays `None` when absent or null, `available_quantity` defaults to 0,
/// `thumbnail` defaults to an empty string.
#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
    price: f64,
    #[serde(default)]
    original_price: Option<f64>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    available_quantity: Option<u64>,
    permalink: String,
    #[serde(default)]
    seller: Option<SearchSeller>,
}

#[derive(Debug, Deserialize)]
struct SearchSeller {
    #[serde(default)]
    nickname: Option<String>,
}

impl SearchItem {
    fn into_record(self) -> Result<ProductRecord, ParserError> {
        let seller_name = self
            .seller
            .and_then(|s| s.nickname)
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ParserError::MissingField("seller.nickname".into()))?;

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ParserError::InvalidField(format!("price {}", self.price)));
        }

        Ok(ProductRecord {
            name: self.title,
            price: self.price,
            original_price: self.original_price,
            thumbnail_url: self.thumbnail.unwrap_or_default(),
            available_quantity: self.available_quantity.unwrap_or(0),
            permalink: self.permalink,
            seller_name,
        })
    }
}

pub struct MarketplaceParser;

impl MarketplaceParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarketplaceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarketplaceParser {
    /// Malformed items are skipped with a warning; only an unreadable body fails the batch.
    fn parse(&self, body: &str) -> Result<Vec<ProductRecord>, ParserError> {
        let response: SearchResponse = serde_json::from_str(body)?;
        let items = response.results.unwrap_or_default();

        let mut records = Vec::with_capacity(items.len());
        for (index, raw) in items.into_iter().enumerate() {
            let record = serde_json::from_value::<SearchItem>(raw)
                .map_err(ParserError::from)
                .and_then(SearchItem::into_record);
            match record {
                Ok(r) => records.push(r),
                Err(e) => warn!("Skipping result #{}: {}", index, e),
            }
        }

        debug!("Parsed {} listings", records.len());
        Ok(records)
    }
}
