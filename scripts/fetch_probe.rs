//! Runs every source adapter directly for one topic and prints what
//! each returned. Useful for checking credentials and feed health
//! without the backend in the loop.
//!
//! Usage: fetch-probe [topic] [limit]

use newsgauge::config::Credentials;
use newsgauge::sources::{all_sources, NewsSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("newsgauge=info"))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    let mut args = std::env::args().skip(1);
    let topic = args.next().unwrap_or_else(|| "technology".to_string());
    let limit: usize = args.next().and_then(|v| v.parse().ok()).unwrap_or(5);

    let credentials = Credentials::from_env();

    for source in all_sources(&credentials) {
        let articles = source.fetch(&topic, limit).await;
        println!("{}: {} articles for '{}'", source.name(), articles.len(), topic);
        for article in &articles {
            println!("  - {} [{}]", article.title, article.source);
            if !article.url.is_empty() {
                println!("    {}", article.url);
            }
        }
    }

    Ok(())
}
