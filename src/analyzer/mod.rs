// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod price_analysis;
pub mod seller_analysis;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, AnalyzerImpl};
