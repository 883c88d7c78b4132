use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::models::Article;

use super::{build_client, NewsSource};

const DEFAULT_BASE_URL: &str = "https://gnews.io/api/v4/search";

/// Keyed-search adapter for the GNews search endpoint. Same contract as
/// the NewsAPI adapter but with GNews parameter names and schema; GNews
/// carries no author field, so the publisher name stands in for it.
pub struct GNewsSource {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GNewsSource {
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
    url: Option<String>,
    source: Option<RawSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    name: Option<String>,
}

fn map_article(raw: RawArticle) -> Article {
    let content = raw
        .content
        .filter(|c| !c.is_empty())
        .or(raw.description)
        .unwrap_or_default();

    let publisher = raw
        .source
        .and_then(|s| s.name)
        .unwrap_or_else(|| "Unknown".to_string());

    Article {
        title: raw.title.unwrap_or_default(),
        content,
        author: publisher.clone(),
        url: raw.url.unwrap_or_default(),
        source: publisher,
        published_at: raw.published_at.unwrap_or_default(),
        image_url: raw.image.unwrap_or_default(),
        ..Default::default()
    }
}

#[async_trait]
impl NewsSource for GNewsSource {
    fn name(&self) -> &'static str {
        "GNews"
    }

    async fn fetch(&self, topic: &str, limit: usize) -> Vec<Article> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("GNews API key not configured, skipping source");
            return Vec::new();
        };

        let max = limit.to_string();
        let result = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", topic),
                ("lang", "en"),
                ("max", max.as_str()),
                ("apikey", api_key),
            ])
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!("GNews request failed: {e}");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!("GNews returned status {}", response.status());
            return Vec::new();
        }

        match response.json::<SearchResponse>().await {
            Ok(body) => body.articles.into_iter().map(map_article).collect(),
            Err(e) => {
                warn!("GNews response could not be parsed: {e}");
                Vec::new()
            }
        }
    }
}
