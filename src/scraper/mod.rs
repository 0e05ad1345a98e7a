pub mod traits;
pub mod fetcher;
pub mod retry;

pub use fetcher::ScraperImpl;
pub use retry::RetryingScraper;
pub use traits::Scraper;
