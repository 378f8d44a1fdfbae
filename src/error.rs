//! Error types shared by every stage of the feed pipeline.

use thiserror::Error;

/// Everything that can go wrong while building a feed.
///
/// The first four variants are the pipeline failures (transport, text
/// decoding, missing markup, unknown date shapes). The rest cover the
/// ambient plumbing around them: URLs, configuration and output.
#[derive(Error, Debug)]
pub enum FeedError {
    // Pipeline errors
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to decode {url} as GBK")]
    Decode { url: String },

    #[error("detail page {url} has no {field}")]
    Extraction { url: String, field: &'static str },

    #[error("unrecognized date format: {0:?}")]
    DateParse(String),

    // Plumbing errors
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML output error: {0}")]
    Xml(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
