//! CLI administration tool for trade-data-api.
//!
//! Provides diagnostics for the upstream services and direct access to
//! cached entries without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Probe every configured upstream
//! cargo run --bin admin -- upstreams check
//!
//! # List configured upstreams
//! cargo run --bin admin -- upstreams list
//!
//! # Inspect or evict a cached payload
//! cargo run --bin admin -- cache get fx:EUR
//! cargo run --bin admin -- cache del fx:EUR
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `trade_data_api::config`. The `cache` commands
//! need `REDIS_URL` (or `REDIS_HOST`), since the in-memory cache lives
//! inside the server process.

use trade_data_api::config::{self, Config, mask_connection_string};
use trade_data_api::infrastructure::cache::{CacheService, RedisCache};
use trade_data_api::infrastructure::http::{FetchClient, ResponseFormat};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::time::Instant;

/// CLI tool for managing trade-data-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Upstream diagnostics
    Upstreams {
        #[command(subcommand)]
        action: UpstreamAction,
    },

    /// Inspect the shared Redis cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum UpstreamAction {
    /// Probe every upstream once, without retries
    Check,

    /// Show configured endpoints
    List,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Print a cached payload
    Get {
        /// Cache key (e.g. "countries:all", "fx:EUR")
        key: String,
    },

    /// Evict a cached payload
    Del {
        key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Upstreams { action } => handle_upstream_action(action, &config).await?,
        Commands::Cache { action } => handle_cache_action(action, &config).await?,
    }

    Ok(())
}

async fn handle_upstream_action(action: UpstreamAction, config: &Config) -> Result<()> {
    match action {
        UpstreamAction::Check => check_upstreams(config).await?,
        UpstreamAction::List => {
            println!("{}", "🌐 Upstreams".bright_blue().bold());
            println!();
            for (name, url) in config.upstreams.endpoints() {
                println!(
                    "  {:<18} {}",
                    name.cyan(),
                    mask_connection_string(url.as_str()).bright_black()
                );
            }
            println!();
            let keys = if config.upstreams.has_comtrade_key() {
                "configured".green()
            } else {
                "missing (/api/trade disabled)".yellow()
            };
            println!("  Comtrade keys: {}", keys);
            println!();
        }
    }

    Ok(())
}

/// Probes each endpoint with a single attempt and prints a status table.
///
/// # Output Format
///
/// ```text
/// 🔍 Checking upstreams
///
///   Name               Status         Time
///   ECB                OK 200         142ms
///   VIES               UPSTREAM_5XX   310ms
/// ```
///
/// Any HTTP answer means the service is reachable; only transport
/// failures are shown in red.
async fn check_upstreams(config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking upstreams".bright_blue().bold());
    println!();

    let client =
        FetchClient::new(config.fetch_defaults()).context("Failed to build HTTP client")?;

    println!(
        "  {:<18} {:<14} {}",
        "Name".bright_white().bold(),
        "Status".bright_white().bold(),
        "Time".bright_white().bold()
    );
    println!("  {}", "─".repeat(42).bright_black());

    let mut unreachable = 0;
    for (name, url) in config.upstreams.endpoints() {
        let options = client.options().retries(0).format(ResponseFormat::Text);
        let started = Instant::now();
        let outcome = client.fetch_json(url.as_str(), options).await;
        let elapsed = format!("{}ms", started.elapsed().as_millis());

        let status = match outcome {
            Ok(fetched) => format!("OK {}", fetched.status).green(),
            Err(e) if e.status() == 408 || e.is_network() => {
                unreachable += 1;
                e.code().red()
            }
            Err(e) => e.code().yellow(),
        };

        println!(
            "  {:<18} {:<14} {}",
            name.cyan(),
            status,
            elapsed.bright_black()
        );
    }

    println!();
    if unreachable == 0 {
        println!("{}", "✅ All upstreams reachable".green().bold());
    } else {
        println!(
            "{}",
            format!("⚠️  {} upstream(s) unreachable", unreachable)
                .yellow()
                .bold()
        );
    }
    println!();

    Ok(())
}

async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("Redis is not configured; set REDIS_URL or REDIS_HOST")?;

    let cache = RedisCache::connect(redis_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Redis: {}", e))?;

    match action {
        CacheAction::Get { key } => {
            let value = cache
                .get(&key)
                .await
                .map_err(|e| anyhow::anyhow!("Cache error: {}", e))?;

            match value {
                Some(raw) => {
                    let pretty = serde_json::from_str::<serde_json::Value>(&raw)
                        .and_then(|v| serde_json::to_string_pretty(&v))
                        .unwrap_or(raw);
                    println!("{}", pretty);
                }
                None => println!("{}", format!("  No entry for '{}'", key).yellow()),
            }
        }
        CacheAction::Del { key, yes } => {
            println!("  Key: {}", key.cyan());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Evict this entry?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            cache
                .del(&key)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to evict entry: {}", e))?;

            println!("{}", "✅ Entry evicted".green().bold());
        }
    }

    Ok(())
}
