//! CLI administration tool for shortlink.
//!
//! Runs the same link operations as the HTTP API directly against the
//! database, without starting the server.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (reuses the existing code if already shortened)
//! cargo run --bin admin -- shorten https://example.com/a
//!
//! # Look up a code without counting a visit
//! cargo run --bin admin -- resolve 3f9a1
//!
//! # Visit count of a code
//! cargo run --bin admin -- visits 3f9a1
//!
//! # Total links
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database and generation settings as the server (see `shortlink::config`).

use shortlink::api::dto::shorten::ShortenRequest;
use shortlink::application::services::LinkService;
use shortlink::config;
use shortlink::infrastructure::cache::NullCache;
use shortlink::infrastructure::persistence::PgLinkRepository;
use shortlink::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or reuse) a short code for a URL
    Shorten {
        /// The long URL to shorten
        url: String,
    },

    /// Show the long URL behind a code
    ///
    /// Bypasses the cache and does not count a visit.
    Resolve { code: String },

    /// Show the visit count of a code
    Visits { code: String },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = connect_pool(&config).await?;

    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repository, Arc::new(NullCache::new()))
        .with_limits(config.generation_limits());

    let result = match cli.command {
        Commands::Shorten { url } => shorten(&service, &config.base_url, &url).await,
        Commands::Resolve { code } => resolve(&service, &code).await,
        Commands::Visits { code } => visits(&service, &code).await,
        Commands::Stats => stats(&service).await,
        Commands::Db {
            action: DbAction::Check,
        } => db_check(&pool).await,
    };

    pool.close().await;
    result
}

async fn shorten(service: &LinkService, base_url: &str, url: &str) -> Result<()> {
    ShortenRequest::new(url)
        .check()
        .with_context(|| format!("Refusing to shorten '{}'", url))?;

    let outcome = service
        .create_short_link(url)
        .await
        .context("Failed to shorten URL")?;

    if outcome.reused {
        println!("{}", "URL was already shortened".yellow());
    } else {
        println!("{}", "Short link created".green().bold());
    }

    println!("  Code:      {}", outcome.code.bright_yellow().bold());
    println!(
        "  Short URL: {}",
        LinkService::short_url(base_url, &outcome.code).cyan()
    );

    Ok(())
}

async fn resolve(service: &LinkService, code: &str) -> Result<()> {
    let long_url = service
        .resolve_short_link(code)
        .await
        .with_context(|| format!("Failed to resolve '{}'", code))?;

    println!("{} -> {}", code.bright_yellow(), long_url.cyan());
    Ok(())
}

async fn visits(service: &LinkService, code: &str) -> Result<()> {
    let count = service
        .get_visit_count(code)
        .await
        .with_context(|| format!("Failed to read visit count for '{}'", code))?;

    println!("{}: {} visits", code.bright_yellow(), count.to_string().bold());
    Ok(())
}

async fn stats(service: &LinkService) -> Result<()> {
    let total = service.total_links().await.context("Failed to count links")?;

    println!("{}", "Statistics".bright_blue().bold());
    println!("  Links: {}", total.to_string().bold());
    Ok(())
}

async fn db_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .context("Database query failed")?;

    println!("{}", "Database connection OK".green().bold());
    Ok(())
}
