use crate::config::AppConfig;
use crate::model::{FetchError, SearchRequest};
use crate::scraper::traits::Scraper;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

pub struct ScraperImpl {
    pub client: Client,
    pub api_base: String,
}

impl ScraperImpl {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, req: &SearchRequest) -> String {
        format!("{}/sites/{}/search", self.api_base, req.site_id)
    }
}

#[async_trait::async_trait]
impl Scraper for ScraperImpl {
    async fn fetch(&self, req: &SearchRequest) -> Result<String, FetchError> {
        let url = self.build_url(req);
        debug!("GET {} q={}", url, req.query);

        let response = self.client.get(&url)
            .query(&[("q", req.query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Search API responded [{}] for '{}'", status, req.query);
            return Err(FetchError::UpstreamUnavailable { status: status.as_u16() });
        }

        Ok(response.text().await?)
    }
}
