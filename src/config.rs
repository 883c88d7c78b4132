use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the analysis backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Topics offered in the dashboard sidebar
    #[serde(default = "default_topics")]
    pub topics: Vec<String>,
    /// Default per-topic article cap for fetch requests
    #[serde(default = "default_articles_per_topic")]
    pub articles_per_topic: usize,
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_articles_per_topic() -> usize {
    8
}

fn default_topics() -> Vec<String> {
    [
        "Technology",
        "AI",
        "Machine Learning",
        "Cybersecurity",
        "Blockchain",
        "Climate action",
        "US Election 2024",
        "Congress legislation",
        "Supreme Court",
        "Ukraine war",
        "China US relations",
        "Stock market",
        "Federal Reserve",
        "Cryptocurrency",
        "Economy",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            topics: default_topics(),
            articles_per_topic: default_articles_per_topic(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    /// A present-but-invalid file is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

/// API keys for the keyed-search providers. A missing key degrades that
/// provider to a no-op source rather than an error.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub newsapi_key: Option<String>,
    pub gnews_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            newsapi_key: env_key("NEWSAPI_API_KEY"),
            gnews_key: env_key("GNEWS_API_KEY"),
        }
    }
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
