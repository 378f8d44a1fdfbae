//! Feed assembly: category → listing → resolved articles → envelope.

use crate::cache::ItemCache;
use crate::category::{self, CategorySpec};
use crate::config::Settings;
use crate::error::FeedResult;
use crate::fetcher::{Fetcher, fetch_document};
use crate::models::{EnrichedItem, FeedEnvelope};
use crate::resolver::DetailResolver;
use crate::scrapers::listing::parse_listing;
use crate::utils::site_title;
use chrono::Utc;
use tracing::{info, instrument, warn};
use url::Url;

/// Articles per feed when the caller does not say otherwise.
pub const DEFAULT_LIMIT: usize = 12;

/// Absolute listing URL for a category.
pub fn listing_url(settings: &Settings, category: &CategorySpec) -> FeedResult<Url> {
    Ok(settings.root()?.join(category.listing_path)?)
}

/// Build the feed for `category` (default: general) with up to `limit` articles.
///
/// A listing with no entries produces a valid, empty feed. Any listing or
/// detail failure fails the whole feed.
#[instrument(level = "info", skip(fetcher, cache, settings))]
pub async fn get_feed<F: Fetcher>(
    fetcher: &F,
    cache: &ItemCache<EnrichedItem>,
    settings: &Settings,
    category: Option<&str>,
    limit: usize,
) -> FeedResult<FeedEnvelope> {
    let category = CategorySpec::resolve(category);
    if !category::is_known(&category.id) {
        warn!(id = %category.id, "Unknown category; using the general listing");
    }

    let root = settings.root()?;
    let link = listing_url(settings, &category)?;
    let html = fetch_document(fetcher, &link).await?;
    let listing = parse_listing(&html, &root, limit, Utc::now().date_naive());

    let resolver = DetailResolver::new(fetcher, cache, settings.concurrency);
    let items = resolver
        .resolve_all(listing.candidates, listing.language.as_deref())
        .await?;

    let site = listing.title.as_deref().map(site_title).unwrap_or_default();
    let feed = FeedEnvelope {
        title: format!("{site} - {}", category.display_name),
        description: listing.description,
        link: link.to_string(),
        item: items,
        allow_empty: true,
        image: settings.logo_url()?.to_string(),
        author: listing.author,
        language: listing.language,
    };
    info!(title = %feed.title, items = feed.item.len(), "Assembled feed");
    Ok(feed)
}
