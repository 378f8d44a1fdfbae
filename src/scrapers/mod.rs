//! Scrapers for the QQ Speed news center.
//!
//! Scraping follows the site's two-phase layout:
//!
//! 1. **Listing** ([`listing`]): extract candidate entries and feed metadata
//!    from a category listing page
//! 2. **Detail** ([`detail`]): enrich one candidate from its article page
//!
//! Both take already-decoded text; fetching and GBK decoding live in
//! [`crate::fetcher`].

pub mod detail;
pub mod listing;
