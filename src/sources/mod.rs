//! Source adapters for pulling articles from external news providers.
//!
//! All adapters share one capability: `fetch(topic, limit)`. Failures
//! never reach the caller; each adapter logs the problem and returns
//! whatever it managed to collect, possibly nothing.

use async_trait::async_trait;

use crate::config::Credentials;
use crate::models::Article;

pub mod gnews;
pub mod newsapi;
pub mod rss;

pub use gnews::GNewsSource;
pub use newsapi::NewsApiSource;
pub use rss::RssSource;

/// Request timeout applied by every adapter
pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 10;
pub(crate) const USER_AGENT: &str = "newsgauge/0.1 (news credibility dashboard)";

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the news source
    fn name(&self) -> &'static str;

    /// Fetches up to `limit` articles matching `topic`. Never fails:
    /// missing credentials, HTTP errors, and parse faults all degrade
    /// to an empty result.
    async fn fetch(&self, topic: &str, limit: usize) -> Vec<Article>;
}

/// All configured adapters, in the order the backend consults them.
pub fn all_sources(credentials: &Credentials) -> Vec<Box<dyn NewsSource>> {
    vec![
        Box::new(NewsApiSource::new(credentials.newsapi_key.clone())),
        Box::new(GNewsSource::new(credentials.gnews_key.clone())),
        Box::new(RssSource::new()),
    ]
}

pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client")
}
