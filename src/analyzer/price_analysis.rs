use crate::analyzer::seller_analysis::{highlight, mean_listings_per_seller, tally_sellers};
use crate::model::{AggregateError, DiscountEntry, PricedListing, ProductRecord, Statistics};
use crate::utils::round2;
use std::cmp::Ordering;
use tracing::debug;

/// Trait defining the interface for a listing aggregator.
pub trait Analyzer: Send + Sync {
    fn aggregate(&self, records: &[ProductRecord]) -> Result<Statistics, AggregateError>;
}

/// Implementation of the listing aggregator.
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnalyzerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for AnalyzerImpl {
    /// Builds every derived view from a fresh copy of `records`.
    fn aggregate(&self, records: &[ProductRecord]) -> Result<Statistics, AggregateError> {
        if records.is_empty() {
            return Err(AggregateError::EmptyInput);
        }

        let sorted = sort_by_price_desc(records);
        let (most_expensive, least_expensive) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => return Err(AggregateError::EmptyInput),
        };

        let seller_tally = tally_sellers(&sorted);
        let mean_count = mean_listings_per_seller(&seller_tally);
        let (top_seller, bottom_seller) =
            highlight(&seller_tally).ok_or(AggregateError::EmptyInput)?;

        let stats = Statistics {
            mean_price: mean_price(&sorted),
            discounts: discount_amounts(&sorted),
            max_available_quantity: max_available_quantity(&sorted),
            listings: sorted
                .into_iter()
                .map(|record| PricedListing {
                    discount_pct: discount_pct(&record),
                    record,
                })
                .collect(),
            most_expensive,
            least_expensive,
            seller_tally,
            mean_listings_per_seller: mean_count,
            top_seller,
            bottom_seller,
        };

        debug!(
            "Aggregated {} listings: mean = {:.2}, sellers = {}",
            stats.total_listings(),
            stats.mean_price,
            stats.seller_count()
        );
        Ok(stats)
    }
}

/// Stable sort, highest price first; equal prices keep their input order.
pub fn sort_by_price_desc(records: &[ProductRecord]) -> Vec<ProductRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal));
    sorted
}

/// Arithmetic mean of all prices, rounded to 2 decimals. 0.0 for no records.
pub fn mean_price(records: &[ProductRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: f64 = records.iter().map(|r| r.price).sum();
    round2(total / records.len() as f64)
}

/// Integer discount percentage, truncated toward zero.
/// 0 when there is no original price or it is zero; price increases come out negative.
pub fn discount_pct(record: &ProductRecord) -> i64 {
    match record.original_price {
        Some(original) if original != 0.0 => {
            (100.0 * (original - record.price) / original).trunc() as i64
        }
        _ => 0,
    }
}

/// `original_price - price` per listing; listings without an original price are dropped.
pub fn discount_amounts(records: &[ProductRecord]) -> Vec<DiscountEntry> {
    records
        .iter()
        .filter_map(|r| {
            r.original_price.map(|original| DiscountEntry {
                name: r.name.clone(),
                seller_name: r.seller_name.clone(),
                amount: original - r.price,
            })
        })
        .collect()
}

pub fn max_available_quantity(records: &[ProductRecord]) -> u64 {
    records.iter().map(|r| r.available_quantity).max().unwrap_or(0)
}
