//! JSON rendering of the feed envelope.
//!
//! The envelope is written as-is (camelCase fields, `allowEmpty: true`,
//! RFC 3339 `pubDate`s) for consumers that want the structured form.

use crate::error::FeedResult;
use crate::models::FeedEnvelope;

pub fn to_json(feed: &FeedEnvelope) -> FeedResult<String> {
    Ok(serde_json::to_string_pretty(feed)?)
}
