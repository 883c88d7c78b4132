//! JSON-over-HTTP client for the remote analysis backend.
//!
//! Every operation POSTs to a walker endpoint and unwraps the backend's
//! `reports` envelope. A 200 status is the only success; anything else
//! (or a transport fault) becomes a [`BackendError`] that the dashboard
//! surfaces as an error banner. No retries.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::Article;

const CLEAR_PATH: &str = "/walker/ClearAllArticlesWalker";
const FETCH_PATH: &str = "/walker/FetchNewsWalker";
const LIST_PATH: &str = "/walker/GetAllArticlesWalker";
const ANALYZE_PATH: &str = "/walker/AnalyzeCredibilityWalker";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend returned status {0}")]
    Status(StatusCode),
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    reports: Vec<T>,
}

/// Deletion counts reported by the clear-all operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearSummary {
    #[serde(default)]
    pub deleted_articles: i64,
    #[serde(default)]
    pub deleted_topics: i64,
    #[serde(default)]
    pub deleted_sources: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FetchSummary {
    #[serde(default)]
    articles_fetched: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ArticleListing {
    #[serde(default)]
    articles: Vec<Article>,
}

pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Analysis can take the backend a while per article, so the client
    /// keeps reqwest's default of no overall timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<T>, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(BackendError::Status(status));
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.reports)
    }

    /// Clear all articles, topics, and sources on the backend.
    pub async fn clear_all(&self) -> Result<ClearSummary, BackendError> {
        let reports: Vec<ClearSummary> = self.post(CLEAR_PATH, &serde_json::json!({})).await?;
        Ok(reports.into_iter().next().unwrap_or_default())
    }

    /// Ask the backend to fetch articles for one topic. Returns the
    /// count of newly stored articles.
    pub async fn fetch_topic(&self, topic: &str, max_articles: usize) -> Result<i64, BackendError> {
        let body = serde_json::json!({ "topic": topic, "max_articles": max_articles });
        let reports: Vec<FetchSummary> = self.post(FETCH_PATH, &body).await?;
        Ok(reports.into_iter().next().map(|r| r.articles_fetched).unwrap_or(0))
    }

    /// Full article collection, taken verbatim from the backend.
    pub async fn list_articles(&self) -> Result<Vec<Article>, BackendError> {
        let reports: Vec<ArticleListing> = self.post(LIST_PATH, &serde_json::json!({})).await?;
        Ok(reports.into_iter().next().map(|r| r.articles).unwrap_or_default())
    }

    /// Kick off a scoring pass. The retry hint is acted on by the
    /// backend, not by this client.
    pub async fn analyze(&self, max_retries: u32) -> Result<(), BackendError> {
        let body = serde_json::json!({ "max_retries": max_retries });
        let _: Vec<serde_json::Value> = self.post(ANALYZE_PATH, &body).await?;
        Ok(())
    }
}
