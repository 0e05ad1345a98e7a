//! Marketplace search dashboard: fetches listings for a product query,
//! aggregates price and seller statistics and renders them.

pub mod analyzer;
pub mod config;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod scraper;
pub mod utils;
