use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;
use tracing::{info, warn};

use crate::models::Article;

use super::{build_client, NewsSource};

/// Feeds scanned by the multi-feed adapter, in scan order.
const FEED_URLS: [&str; 5] = [
    "http://rss.cnn.com/rss/cnn_topstories.rss",
    "http://feeds.bbci.co.uk/news/rss.xml",
    "https://www.theguardian.com/world/rss",
    "https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml",
    "https://feeds.reuters.com/reuters/topNews",
];

/// Only the head of each feed is scanned for topic matches.
const ENTRIES_PER_FEED: usize = 30;

/// Multi-feed adapter: scans a fixed list of syndication feeds in order
/// and keeps entries whose title or summary contains the topic. One bad
/// feed never aborts the scan; the remaining feeds still run.
pub struct RssSource {
    client: Client,
    feeds: Vec<String>,
}

impl RssSource {
    pub fn new() -> Self {
        Self::with_feeds(FEED_URLS.iter().map(|s| s.to_string()).collect())
    }

    /// Scan a custom feed list (used by tests)
    pub fn with_feeds(feeds: Vec<String>) -> Self {
        Self {
            client: build_client(),
            feeds,
        }
    }

    async fn scan_feed(
        &self,
        feed_url: &str,
        needle: &str,
        remaining: usize,
    ) -> anyhow::Result<Vec<Article>> {
        info!("Fetching RSS feed: {feed_url}");

        let response = self.client.get(feed_url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        let parsed = parser::parse(&bytes[..])?;

        let source_name = parsed
            .title
            .map(|t| t.content)
            .unwrap_or_else(|| "RSS Feed".to_string());

        let mut matched = Vec::new();
        for entry in parsed.entries.into_iter().take(ENTRIES_PER_FEED) {
            if matched.len() >= remaining {
                break;
            }

            let title = entry
                .title
                .as_ref()
                .map(|t| t.content.clone())
                .unwrap_or_default();
            let summary = entry
                .summary
                .as_ref()
                .map(|t| t.content.clone())
                .unwrap_or_default();

            if !title.to_lowercase().contains(needle) && !summary.to_lowercase().contains(needle) {
                continue;
            }

            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();
            let author = entry
                .authors
                .first()
                .map(|p| p.name.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string());
            let published = entry
                .published
                .or(entry.updated)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default();

            info!("  Found: {}", title.chars().take(50).collect::<String>());

            matched.push(Article {
                article_id: entry.id,
                title,
                content: summary,
                author,
                url: link,
                source: source_name.clone(),
                published_at: published,
                // RSS items carry no image in the format we consume
                image_url: String::new(),
                ..Default::default()
            });
        }

        Ok(matched)
    }
}

impl Default for RssSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsSource for RssSource {
    fn name(&self) -> &'static str {
        "RSS"
    }

    async fn fetch(&self, topic: &str, limit: usize) -> Vec<Article> {
        let needle = topic.to_lowercase();
        let mut articles = Vec::new();

        for feed_url in &self.feeds {
            if articles.len() >= limit {
                break;
            }

            match self.scan_feed(feed_url, &needle, limit - articles.len()).await {
                Ok(mut matched) => articles.append(&mut matched),
                Err(e) => {
                    warn!("RSS feed error ({feed_url}): {e}");
                    continue;
                }
            }
        }

        info!("Total RSS articles found for '{topic}': {}", articles.len());
        articles
    }
}
