//! Output writers for assembled feeds.
//!
//! - [`rss`]: RSS 2.0 XML for feed readers
//! - [`json`]: the feed envelope as JSON
//!
//! Both render to a string; [`write_feed`] sends it to stdout or a file.

pub mod json;
pub mod rss;

use crate::cli::Format;
use crate::error::FeedResult;
use crate::models::FeedEnvelope;
use tokio::fs;
use tokio::io::{self, AsyncWriteExt};
use tracing::{info, instrument};

pub fn render(feed: &FeedEnvelope, format: Format) -> FeedResult<String> {
    match format {
        Format::Rss => rss::to_rss(feed),
        Format::Json => json::to_json(feed),
    }
}

/// Write a rendered feed to `output`, or to stdout when it is `None`.
#[instrument(level = "info", skip(feed))]
pub async fn write_feed(feed: &FeedEnvelope, format: Format, output: Option<&str>) -> FeedResult<()> {
    let body = render(feed, format)?;
    match output {
        Some(path) => {
            fs::write(path, &body).await?;
            info!(path, bytes = body.len(), "Wrote feed");
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(body.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
