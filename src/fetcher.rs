//! Page fetching and GBK decoding.
//!
//! The news center serves every page as GBK. Bytes are always decoded
//! explicitly with [`decode_gbk`] before any HTML parsing, for listing and
//! detail pages alike, and malformed input is an error rather than a page
//! full of replacement characters.

use crate::config::Settings;
use crate::error::{FeedError, FeedResult};
use encoding_rs::GBK;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

/// Transport seam: fetch the raw body behind a URL.
pub trait Fetcher {
    async fn fetch_bytes(&self, url: &Url) -> FeedResult<Vec<u8>>;
}

/// [`Fetcher`] backed by a shared `reqwest` client. No retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> FeedResult<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FeedError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_bytes(&self, url: &Url) -> FeedResult<Vec<u8>> {
        let t0 = Instant::now();
        let fetch_error = |e: reqwest::Error| FeedError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Non-success status");
            return Err(FeedError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let bytes = response.bytes().await.map_err(fetch_error)?;
        debug!(
            bytes = bytes.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(bytes.to_vec())
    }
}

/// Decode a GBK body. `url` is only used for the error.
pub fn decode_gbk(bytes: &[u8], url: &Url) -> FeedResult<String> {
    GBK.decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| FeedError::Decode {
            url: url.to_string(),
        })
}

/// Fetch a page and decode it into parseable text.
pub async fn fetch_document<F: Fetcher>(fetcher: &F, url: &Url) -> FeedResult<String> {
    let bytes = fetcher.fetch_bytes(url).await?;
    decode_gbk(&bytes, url)
}
