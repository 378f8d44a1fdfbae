//! # Speed News
//!
//! Turns the QQ Speed (speed.qq.com) news center into a feed a reader can
//! subscribe to, one feed per section: general, events, announcements and
//! competitions.
//!
//! ## Usage
//!
//! ```sh
//! speed_news 14585 --limit 5 --format json
//! ```
//!
//! ## Architecture
//!
//! Each run follows a small pipeline:
//! 1. **Listing**: resolve the category to its listing page, fetch it and
//!    decode it from GBK
//! 2. **Extraction**: keep the first `limit` entries of the news list
//! 3. **Enrichment**: resolve every entry's detail page concurrently through a
//!    per-link, single-flight cache, in listing order
//! 4. **Output**: assemble the feed envelope and write RSS or JSON

use clap::Parser;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cache;
mod category;
mod cli;
mod config;
mod dates;
mod error;
mod feed;
mod fetcher;
mod models;
mod outputs;
mod resolver;
mod scrapers;
#[cfg(test)]
mod test_support;
mod utils;

use cache::ItemCache;
use category::KNOWN_CATEGORIES;
use cli::Cli;
use config::Settings;
use error::FeedResult;
use fetcher::HttpFetcher;
use models::EnrichedItem;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr, so stdout stays a clean feed) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    if args.list_categories {
        for id in KNOWN_CATEGORIES {
            println!("{id}\t{}", category::display_name(id));
        }
        return Ok(());
    }

    let mut settings = Settings::load(args.config.as_deref()).await?;
    if let Some(concurrency) = args.concurrency {
        settings.concurrency = concurrency.max(1);
    }
    info!(
        root = %settings.root_url,
        concurrency = settings.concurrency,
        cache_ttl_secs = ?settings.cache_ttl_secs,
        "speed_news starting up"
    );

    let fetcher = HttpFetcher::new(&settings)?;
    let cache: ItemCache<EnrichedItem> = ItemCache::new(settings.cache_ttl());

    let Some(secs) = args.interval else {
        run_once(&fetcher, &cache, &settings, &args).await?;
        return Ok(());
    };

    // ---- Periodic mode: the detail cache outlives each run ----
    let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = run_once(&fetcher, &cache, &settings, &args).await {
                    error!(error = %e, "Feed generation failed; trying again next interval");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted; shutting down");
                return Ok(());
            }
        }
    }
}

#[instrument(level = "info", skip_all, fields(category = %args.category, limit = args.limit))]
async fn run_once(
    fetcher: &HttpFetcher,
    cache: &ItemCache<EnrichedItem>,
    settings: &Settings,
    args: &Cli,
) -> FeedResult<()> {
    let start_time = Instant::now();
    let feed = feed::get_feed(fetcher, cache, settings, Some(&args.category), args.limit).await?;
    outputs::write_feed(&feed, args.format, args.output.as_deref()).await?;

    let elapsed = start_time.elapsed();
    info!(
        items = feed.item.len(),
        millis = elapsed.as_millis() as u64,
        "Feed generated"
    );
    Ok(())
}
