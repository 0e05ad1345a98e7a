use crate::model::{FetchError, SearchRequest};

/// Transport half of the fetcher: returns the raw search response body.
#[async_trait::async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch(&self, req: &SearchRequest) -> Result<String, FetchError>;
}
