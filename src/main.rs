use std::env;

use chrono::Utc;
use log::debug;

use forks_news::{FeedStatus, NewsClient, NewsConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Usage: forks-news [QUERY] [--json]
    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let query = args.iter().find(|a| !a.starts_with("--")).cloned();

    let config = NewsConfig::load()?;
    let query = query.unwrap_or_else(|| config.query.clone());
    debug!("Searching '{}' on {}", query, config.base_url);

    let client = NewsClient::from_config(&config)?;
    let feed = client.request_articles(&query).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&feed.articles)?);
        return Ok(());
    }

    match &feed.status {
        FeedStatus::NoNetwork => println!("No network available."),
        FeedStatus::Empty => println!("No news found."),
        FeedStatus::Failed(e) => {
            eprintln!("Error: {}", e);
            println!("No news found.");
        }
        FeedStatus::Loaded => {
            let now = Utc::now();
            if let Some(main) = feed.featured() {
                println!("{}", main.title());
                println!(
                    "  {} | {} | {} ({})",
                    main.section(),
                    main.contributor(),
                    main.local_time(),
                    main.relative_age(now)
                );
                println!("  {}", main.url());
            }

            if !feed.related().is_empty() {
                println!("\nRelated:");
            }
            for article in feed.related() {
                println!(
                    "  - {} [{}, {}]",
                    article.title(),
                    article.section(),
                    article.relative_age(now)
                );
            }
        }
    }

    Ok(())
}
