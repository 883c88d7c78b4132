use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::models::Article;

use super::{build_client, NewsSource};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/everything";

/// Keyed-search adapter for the NewsAPI "everything" endpoint.
pub struct NewsApiSource {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiSource {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the adapter at a different endpoint (used by tests)
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            api_key,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Default, Deserialize)]
struct RawArticle {
    title: Option<String>,
    content: Option<String>,
    description: Option<String>,
    author: Option<String>,
    url: Option<String>,
    source: Option<RawSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    name: Option<String>,
}

fn map_article(raw: RawArticle) -> Article {
    // NewsAPI often sends an empty or null content field; fall back to
    // the description before giving up.
    let content = raw
        .content
        .filter(|c| !c.is_empty())
        .or(raw.description)
        .unwrap_or_default();

    Article {
        title: raw.title.unwrap_or_default(),
        content,
        author: raw
            .author
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        url: raw.url.unwrap_or_default(),
        source: raw
            .source
            .and_then(|s| s.name)
            .unwrap_or_else(|| "Unknown".to_string()),
        published_at: raw.published_at.unwrap_or_default(),
        image_url: raw.url_to_image.unwrap_or_default(),
        ..Default::default()
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &'static str {
        "NewsAPI"
    }

    async fn fetch(&self, topic: &str, limit: usize) -> Vec<Article> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("NewsAPI key not configured, skipping source");
            return Vec::new();
        };

        let page_size = limit.to_string();
        let result = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", topic),
                ("pageSize", page_size.as_str()),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("apiKey", api_key),
            ])
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!("NewsAPI request failed: {e}");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!("NewsAPI returned status {}", response.status());
            return Vec::new();
        }

        match response.json::<SearchResponse>().await {
            Ok(body) => body.articles.into_iter().map(map_article).collect(),
            Err(e) => {
                warn!("NewsAPI response could not be parsed: {e}");
                Vec::new()
            }
        }
    }
}
