use serde::{Deserialize, Serialize};

fn unknown() -> String {
    "Unknown".to_string()
}

/// An article as produced by the source adapters and enriched by the
/// analysis backend. Every field is individually defaulted so partial
/// payloads from any upstream always deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub article_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "unknown")]
    pub author: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "unknown")]
    pub source: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub image_url: String,
    // Assigned by the analysis backend, zero until an analyze pass runs
    #[serde(default)]
    pub credibility_score: f64,
    #[serde(default)]
    pub bias_score: f64,
    #[serde(default)]
    pub polarization_score: f64,
    #[serde(default)]
    pub claims: Vec<String>,
    #[serde(default)]
    pub read_count: i64,
}

impl Default for Article {
    fn default() -> Self {
        Self {
            article_id: String::new(),
            title: String::new(),
            content: String::new(),
            author: unknown(),
            url: String::new(),
            source: unknown(),
            published_at: String::new(),
            image_url: String::new(),
            credibility_score: 0.0,
            bias_score: 0.0,
            polarization_score: 0.0,
            claims: Vec::new(),
            read_count: 0,
        }
    }
}

pub const PREVIEW_CHARS: usize = 300;

impl Article {
    /// First 300 characters of the content, with an ellipsis when truncated.
    pub fn preview(&self) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }

    pub fn credibility_tier(&self) -> CredibilityTier {
        CredibilityTier::from_score(self.credibility_score)
    }

    pub fn bias_label(&self) -> BiasLabel {
        BiasLabel::from_score(self.bias_score)
    }
}

/// Display tier for a credibility score. A score of exactly zero means
/// the backend has not analyzed the article yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredibilityTier {
    Green,
    Yellow,
    Red,
    NotAnalyzed,
}

impl CredibilityTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            CredibilityTier::Green
        } else if score >= 40.0 {
            CredibilityTier::Yellow
        } else if score > 0.0 {
            CredibilityTier::Red
        } else {
            CredibilityTier::NotAnalyzed
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            CredibilityTier::Green => "tier-green",
            CredibilityTier::Yellow => "tier-yellow",
            CredibilityTier::Red => "tier-red",
            CredibilityTier::NotAnalyzed => "tier-none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CredibilityTier::Green => "High",
            CredibilityTier::Yellow => "Medium",
            CredibilityTier::Red => "Low",
            CredibilityTier::NotAnalyzed => "Not analyzed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasLabel {
    Left,
    Neutral,
    Right,
}

impl BiasLabel {
    pub fn from_score(score: f64) -> Self {
        if score < -30.0 {
            BiasLabel::Left
        } else if score > 30.0 {
            BiasLabel::Right
        } else {
            BiasLabel::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BiasLabel::Left => "Left",
            BiasLabel::Neutral => "Neutral",
            BiasLabel::Right => "Right",
        }
    }
}
