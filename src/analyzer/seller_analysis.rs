use crate::model::{DiscountEntry, ProductRecord, SellerHighlight, SellerShare, SellerTally};
use crate::utils::round2;
use std::collections::HashMap;

/// Counts listings per seller. Shares are ordered by count descending,
/// sellers with equal counts keep the order in which they first appear.
pub fn tally_sellers(records: &[ProductRecord]) -> SellerTally {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for record in records {
        let seller = record.seller_name.as_str();
        match index.get(seller).copied() {
            Some(i) => counts[i].1 += 1,
            None => {
                index.insert(seller, counts.len());
                counts.push((seller, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = records.len();
    let shares = counts
        .into_iter()
        .map(|(seller, count)| SellerShare {
            seller_name: seller.to_string(),
            count,
            percentage: round2(100.0 * count as f64 / total as f64),
        })
        .collect();

    SellerTally { shares, total_listings: total }
}

pub fn mean_listings_per_seller(tally: &SellerTally) -> f64 {
    if tally.shares.is_empty() {
        return 0.0;
    }
    tally.total_listings as f64 / tally.shares.len() as f64
}

/// Sellers with the most and the fewest listings (first match in tally order),
/// each with its deviation from the per-seller mean. `None` for an empty tally.
pub fn highlight(tally: &SellerTally) -> Option<(SellerHighlight, SellerHighlight)> {
    let mean = mean_listings_per_seller(tally);
    let max = tally.shares.iter().map(|s| s.count).max()?;
    let min = tally.shares.iter().map(|s| s.count).min()?;

    let pick = |target: usize| {
        tally.shares.iter().find(|s| s.count == target).map(|s| SellerHighlight {
            seller_name: s.seller_name.clone(),
            count: s.count,
            deviation_pct: deviation_pct(s.count, mean),
        })
    };

    Some((pick(max)?, pick(min)?))
}

/// `(count - mean) / mean * 100`, truncated toward zero.
pub fn deviation_pct(count: usize, mean: f64) -> i64 {
    if mean == 0.0 {
        return 0;
    }
    ((count as f64 - mean) / mean * 100.0).trunc() as i64
}

/// Sums discount amounts per seller, largest first (ties keep first appearance).
pub fn discount_totals_by_seller(discounts: &[DiscountEntry]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for entry in discounts {
        match totals.iter_mut().find(|(seller, _)| *seller == entry.seller_name) {
            Some((_, sum)) => *sum += entry.amount,
            None => totals.push((entry.seller_name.clone(), entry.amount)),
        }
    }
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals
}
