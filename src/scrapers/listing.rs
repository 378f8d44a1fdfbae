//! News center listing pages.
//!
//! A listing is a `div.news-list-item` holding one `li.list-item` per article:
//!
//! ```html
//! <div class="news-list-item"><ul>
//!   <li class="list-item">
//!     <a class="clearfix" href="/webplat/info/.../202405/123.shtml">
//!       <p>新赛季开启</p><span class="date">2024-05-20</span>
//!     </a>
//!   </li>
//! </ul></div>
//! ```
//!
//! Alongside the entries, the page header supplies the feed metadata (site
//! title, description, author, language).

use crate::dates::parse_listing_date;
use crate::models::ListingCandidate;
use crate::utils::squash_whitespace;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static ENTRY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.news-list-item ul li.list-item").unwrap());
static ENTRY_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static ENTRY_DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("span.date").unwrap());
static ENTRY_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a.clearfix[href]").unwrap());
static PAGE_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static DESCRIPTION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="Description"], meta[name="description"]"#).unwrap()
});
static AUTHOR: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"meta[name="author"]"#).unwrap());
static ROOT: Lazy<Selector> = Lazy::new(|| Selector::parse("html").unwrap());

/// Everything the feed needs from one listing page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingPage {
    /// Raw `<title>` text.
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    /// `lang` attribute of the root element.
    pub language: Option<String>,
    /// At most `limit` entries, in document order.
    pub candidates: Vec<ListingCandidate>,
}

/// Parse a decoded listing page.
///
/// Entries without a link are skipped; of the rest only the first `limit` are
/// kept. A page without the list container yields no candidates rather than
/// an error.
#[instrument(level = "info", skip_all, fields(%base, limit))]
pub fn parse_listing(html: &str, base: &Url, limit: usize, today: NaiveDate) -> ListingPage {
    let document = Html::parse_document(html);

    let entries: Vec<ElementRef> = document.select(&ENTRY).collect();
    if entries.is_empty() {
        warn!("No listing entries found; the page layout may have changed");
    }
    let total = entries.len();

    let candidates: Vec<ListingCandidate> = entries
        .into_iter()
        .filter_map(|entry| candidate(entry, base, today))
        .take(limit)
        .collect();

    if candidates.len() < total {
        debug!(kept = candidates.len(), total, "Dropped listing entries past the limit or without a link");
    }
    info!(count = candidates.len(), "Extracted listing candidates");

    ListingPage {
        title: document
            .select(&PAGE_TITLE)
            .next()
            .map(|t| t.text().collect::<String>()),
        description: meta_content(&document, &DESCRIPTION),
        author: meta_content(&document, &AUTHOR),
        language: document
            .select(&ROOT)
            .next()
            .and_then(|root| root.value().attr("lang"))
            .map(str::to_string),
        candidates,
    }
}

fn candidate(entry: ElementRef, base: &Url, today: NaiveDate) -> Option<ListingCandidate> {
    let Some(href) = entry
        .select(&ENTRY_LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
    else {
        warn!("Listing entry has no link; skipping");
        return None;
    };
    let link = match base.join(href.trim()) {
        Ok(link) => link,
        Err(e) => {
            warn!(href, error = %e, "Listing entry has an unusable link; skipping");
            return None;
        }
    };

    let title = squash_whitespace(&inner_text(entry, &ENTRY_TITLE));
    let raw_pub_date = inner_text(entry, &ENTRY_DATE).trim().to_string();
    let pub_date = match parse_listing_date(&raw_pub_date, today) {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(%link, error = %e, "Listing date not recognized");
            None
        }
    };

    Some(ListingCandidate {
        title,
        raw_pub_date,
        pub_date,
        link,
    })
}

fn inner_text(element: ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect())
        .unwrap_or_default()
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://speed.qq.com/").unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn listing_html(entries: usize) -> String {
        let items: String = (0..entries)
            .map(|i| {
                format!(
                    r#"<li class="list-item"><a class="clearfix" href="/webplat/info/news_version3/147/14551/m22621/202405/{i}.shtml"><p>新闻 {i}</p><span class="date">2024-05-{:02}</span></a></li>"#,
                    i + 1
                )
            })
            .collect();
        format!(
            r#"<html lang="zh-CN"><head><title>QQ飞车官方网站-腾讯游戏</title>
            <meta name="Description" content=" QQ飞车资讯中心 ">
            <meta name="author" content="Tencent"></head>
            <body><div class="news-list-item"><ul>{items}</ul></div></body></html>"#
        )
    }

    #[test]
    fn test_limit_keeps_first_entries_in_order() {
        let page = parse_listing(&listing_html(10), &base(), 3, today());
        let titles: Vec<_> = page.candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["新闻 0", "新闻 1", "新闻 2"]);
    }

    #[test]
    fn test_limit_larger_than_listing() {
        let page = parse_listing(&listing_html(4), &base(), 12, today());
        assert_eq!(page.candidates.len(), 4);
    }

    #[test]
    fn test_links_are_absolute() {
        let page = parse_listing(&listing_html(1), &base(), 12, today());
        let candidate = &page.candidates[0];
        assert_eq!(
            candidate.link.as_str(),
            "https://speed.qq.com/webplat/info/news_version3/147/14551/m22621/202405/0.shtml"
        );
        assert_eq!(candidate.raw_pub_date, "2024-05-01");
        assert_eq!(
            candidate.pub_date.unwrap().to_rfc3339(),
            "2024-05-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_page_metadata() {
        let page = parse_listing(&listing_html(0), &base(), 12, today());
        assert_eq!(page.title.as_deref(), Some("QQ飞车官方网站-腾讯游戏"));
        assert_eq!(page.description.as_deref(), Some("QQ飞车资讯中心"));
        assert_eq!(page.author.as_deref(), Some("Tencent"));
        assert_eq!(page.language.as_deref(), Some("zh-CN"));
    }

    #[test]
    fn test_missing_container_is_empty_not_error() {
        let page = parse_listing(
            "<html><head><title>改版</title></head><body><div class=\"other\"></div></body></html>",
            &base(),
            12,
            today(),
        );
        assert!(page.candidates.is_empty());
        assert_eq!(page.title.as_deref(), Some("改版"));
        assert_eq!(page.language, None);
    }

    #[test]
    fn test_entries_without_link_are_skipped() {
        let html = r#"<div class="news-list-item"><ul>
            <li class="list-item"><p>无链接</p><span class="date">2024-05-01</span></li>
            <li class="list-item"><a class="clearfix" href="a.shtml"><p>有链接</p><span class="date">坏日期</span></a></li>
        </ul></div>"#;
        let page = parse_listing(html, &base(), 12, today());
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.candidates[0].title, "有链接");
        assert_eq!(page.candidates[0].pub_date, None);
    }
}
