//! Data models flowing through the feed pipeline.
//!
//! - [`ListingCandidate`]: an entry scraped from a listing page, awaiting enrichment
//! - [`EnrichedItem`]: the resolved article, cached per link
//! - [`FeedEnvelope`]: the feed handed to an output writer
//!
//! Serialized field names are camelCase so the JSON output matches what feed
//! consumers of the news center expect (`pubDate`, `allowEmpty`, ...).

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use url::Url;

/// A listing entry. Transient: consumed by the detail resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCandidate {
    /// Title stub as shown in the listing.
    pub title: String,
    /// Date text exactly as it appeared in the listing.
    pub raw_pub_date: String,
    /// Best-effort parse of `raw_pub_date`.
    pub pub_date: Option<DateTime<FixedOffset>>,
    /// Absolute URL of the detail page.
    pub link: Url,
}

/// Body of an article in both renderings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemContent {
    pub html: String,
    pub text: String,
}

/// A fully resolved article.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedItem {
    pub title: String,
    pub link: String,
    pub pub_date: DateTime<FixedOffset>,
    /// Same markup as `content.html`.
    pub description: String,
    pub content: ItemContent,
    pub image: Option<String>,
    pub banner: Option<String>,
    pub language: Option<String>,
}

/// A feed ready for serialization. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEnvelope {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    /// Articles in listing order.
    pub item: Vec<EnrichedItem>,
    /// Always `true`: an empty listing is a valid feed.
    pub allow_empty: bool,
    pub image: String,
    pub author: Option<String>,
    pub language: Option<String>,
}
