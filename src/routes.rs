use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::backend::BackendClient;
use crate::config::Config;
use crate::models::Article;

/// Retry hint forwarded to the backend's analyze operation.
const ANALYZE_MAX_RETRIES: u32 = 2;
const CLAIMS_SHOWN: usize = 5;
const ID_PREVIEW_CHARS: usize = 16;

pub struct AppState {
    pub config: Config,
    pub backend: BackendClient,
    /// Session-scoped article list. Only ever replaced wholesale by the
    /// reload operation, never mutated field by field.
    pub articles: RwLock<Vec<Article>>,
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub topics: Vec<String>,
    pub articles_per_topic: usize,
    pub min_credibility: i64,
    pub total: usize,
    pub analyzed: usize,
    pub shown: usize,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub views: Vec<ArticleView>,
}

/// Everything the article card template needs, precomputed as strings.
pub struct ArticleView {
    pub index: usize,
    pub title: String,
    pub author: String,
    pub preview: String,
    pub url: String,
    pub credibility: i64,
    pub tier_class: String,
    pub tier_label: String,
    pub bias_label: String,
    pub polarization: i64,
    pub published_at: String,
    pub short_id: String,
    pub read_count: i64,
    pub scores_json: String,
    pub claims: Vec<String>,
}

impl ArticleView {
    pub fn new(index: usize, article: &Article) -> Self {
        let tier = article.credibility_tier();
        let scores_json = serde_json::to_string_pretty(&serde_json::json!({
            "credibility_score": article.credibility_score,
            "bias_score": article.bias_score,
            "polarization_score": article.polarization_score,
        }))
        .unwrap_or_default();

        let title = if article.title.is_empty() {
            "Untitled Article".to_string()
        } else {
            article.title.clone()
        };

        Self {
            index,
            title,
            author: article.author.clone(),
            preview: article.preview(),
            url: article.url.clone(),
            credibility: article.credibility_score as i64,
            tier_class: tier.css_class().to_string(),
            tier_label: tier.label().to_string(),
            bias_label: article.bias_label().label().to_string(),
            polarization: article.polarization_score as i64,
            published_at: if article.published_at.is_empty() {
                "N/A".to_string()
            } else {
                article.published_at.clone()
            },
            short_id: article.article_id.chars().take(ID_PREVIEW_CHARS).collect(),
            read_count: article.read_count,
            scores_json,
            claims: article.claims.iter().take(CLAIMS_SHOWN).cloned().collect(),
        }
    }
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

/// Articles at or above the credibility threshold, original order kept.
pub fn filter_by_credibility(articles: &[Article], threshold: f64) -> Vec<Article> {
    articles
        .iter()
        .filter(|a| a.credibility_score >= threshold)
        .cloned()
        .collect()
}

fn redirect_with_notice(message: &str) -> Redirect {
    Redirect::to(&format!("/?notice={}", urlencoding::encode(message)))
}

fn redirect_with_error(message: &str) -> Redirect {
    Redirect::to(&format!("/?error={}", urlencoding::encode(message)))
}

#[derive(Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub min_credibility: f64,
    pub notice: Option<String>,
    pub error: Option<String>,
}

// Route handlers
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> impl IntoResponse {
    let articles = state.articles.read().await;

    let total = articles.len();
    let analyzed = articles.iter().filter(|a| a.credibility_score > 0.0).count();
    let filtered = filter_by_credibility(&articles, query.min_credibility);
    let views: Vec<ArticleView> = filtered
        .iter()
        .enumerate()
        .map(|(i, article)| ArticleView::new(i + 1, article))
        .collect();

    HtmlTemplate(IndexTemplate {
        topics: state.config.topics.clone(),
        articles_per_topic: state.config.articles_per_topic,
        min_credibility: query.min_credibility as i64,
        total,
        analyzed,
        shown: views.len(),
        notice: query.notice,
        error: query.error,
        views,
    })
}

pub async fn clear(State(state): State<Arc<AppState>>) -> Redirect {
    match state.backend.clear_all().await {
        Ok(summary) => {
            state.articles.write().await.clear();
            redirect_with_notice(&format!(
                "Deleted {} articles, {} topics, {} sources",
                summary.deleted_articles, summary.deleted_topics, summary.deleted_sources
            ))
        }
        Err(e) => redirect_with_error(&format!("Clear failed: {e}")),
    }
}

pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect {
    let topics: Vec<String> = fields
        .iter()
        .filter(|(key, _)| key == "topics")
        .map(|(_, value)| value.clone())
        .collect();
    let max_articles = fields
        .iter()
        .find(|(key, _)| key == "max_articles")
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(state.config.articles_per_topic);

    if topics.is_empty() {
        return redirect_with_error("Select at least one topic first");
    }

    let mut total = 0;
    let mut summaries = Vec::new();
    for (idx, topic) in topics.iter().enumerate() {
        info!("Fetching topic {}/{}: {topic}", idx + 1, topics.len());
        match state.backend.fetch_topic(topic, max_articles).await {
            Ok(count) => {
                total += count;
                summaries.push(format!("{topic}: {count} new"));
            }
            Err(e) => {
                warn!("Fetch for topic '{topic}' failed: {e}");
                summaries.push(format!("{topic}: failed"));
            }
        }
    }

    redirect_with_notice(&format!(
        "Fetched {total} new articles ({}). Reload articles to view them",
        summaries.join(", ")
    ))
}

pub async fn reload(State(state): State<Arc<AppState>>) -> Redirect {
    match state.backend.list_articles().await {
        Ok(list) => {
            let count = list.len();
            *state.articles.write().await = list;
            redirect_with_notice(&format!("Loaded {count} articles"))
        }
        Err(e) => redirect_with_error(&format!("Reload failed: {e}")),
    }
}

pub async fn analyze(State(state): State<Arc<AppState>>) -> Redirect {
    let count = state.articles.read().await.len();
    if count == 0 {
        return redirect_with_error("Load articles first");
    }

    info!("Requesting analysis of {count} articles");
    match state.backend.analyze(ANALYZE_MAX_RETRIES).await {
        Ok(()) => {
            redirect_with_notice("Analysis complete. Reload articles to see updated scores")
        }
        Err(e) => redirect_with_error(&format!("Analysis failed: {e}")),
    }
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
