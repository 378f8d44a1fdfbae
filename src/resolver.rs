//! Concurrent, cached resolution of listing candidates into articles.

use crate::cache::ItemCache;
use crate::error::FeedResult;
use crate::fetcher::{Fetcher, fetch_document};
use crate::models::{EnrichedItem, ListingCandidate};
use crate::scrapers::detail::parse_detail;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{info, instrument};

/// Resolves candidates through a shared [`ItemCache`] keyed by link.
#[derive(Debug)]
pub struct DetailResolver<'a, F> {
    fetcher: &'a F,
    cache: &'a ItemCache<EnrichedItem>,
    concurrency: usize,
}

impl<'a, F: Fetcher> DetailResolver<'a, F> {
    pub fn new(fetcher: &'a F, cache: &'a ItemCache<EnrichedItem>, concurrency: usize) -> Self {
        Self {
            fetcher,
            cache,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve one candidate. A cached link is returned without touching the
    /// network, and concurrent calls for the same link share one fetch.
    #[instrument(level = "debug", skip_all, fields(link = %candidate.link))]
    pub async fn resolve(
        &self,
        candidate: ListingCandidate,
        language: Option<String>,
    ) -> FeedResult<EnrichedItem> {
        let key = candidate.link.to_string();
        let fetcher = self.fetcher;
        self.cache
            .get_or_try_compute(&key, move || async move {
                let html = fetch_document(fetcher, &candidate.link).await?;
                parse_detail(&html, candidate, language)
            })
            .await
    }

    /// Resolve every candidate, at most `concurrency` at a time.
    ///
    /// Results come back in listing order whatever order the fetches finish
    /// in. The first failure aborts the whole batch.
    #[instrument(level = "info", skip_all, fields(count = candidates.len(), concurrency = self.concurrency))]
    pub async fn resolve_all(
        &self,
        candidates: Vec<ListingCandidate>,
        language: Option<&str>,
    ) -> FeedResult<Vec<EnrichedItem>> {
        let items: Vec<EnrichedItem> = stream::iter(candidates)
            .map(|candidate| self.resolve(candidate, language.map(str::to_string)))
            .buffered(self.concurrency)
            .try_collect()
            .await?;
        info!(count = items.len(), cached = self.cache.len(), "Resolved detail pages");
        Ok(items)
    }
}
