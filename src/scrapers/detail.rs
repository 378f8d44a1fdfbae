//! Article detail pages.
//!
//! The detail page is authoritative: its title and date replace the listing
//! stub's, and the body comes from `div.news-details-cont`.

use crate::dates::parse_detail_date;
use crate::error::{FeedError, FeedResult};
use crate::models::{EnrichedItem, ItemContent, ListingCandidate};
use crate::utils::{squash_whitespace, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("div.news-details-title h4").unwrap());
static CONTENT: Lazy<Selector> = Lazy::new(|| Selector::parse("div.news-details-cont").unwrap());
static DATE: Lazy<Selector> = Lazy::new(|| Selector::parse("p.news-details-p1").unwrap());
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Enrich a listing candidate from its decoded detail page.
///
/// # Errors
///
/// - [`FeedError::Extraction`] if the content container is missing, or if
///   neither the page nor the listing provides a date
/// - [`FeedError::DateParse`] if the page's date is present but unrecognized
#[instrument(level = "debug", skip_all, fields(link = %candidate.link))]
pub fn parse_detail(
    html: &str,
    candidate: ListingCandidate,
    language: Option<String>,
) -> FeedResult<EnrichedItem> {
    let document = Html::parse_document(html);
    let missing = |field: &'static str| FeedError::Extraction {
        url: candidate.link.to_string(),
        field,
    };

    let content = document
        .select(&CONTENT)
        .next()
        .ok_or_else(|| missing("content container"))?;
    let body_html = content.inner_html();
    let body_text: String = content.text().collect();

    // Relative sources are resolved against the article itself.
    let image = content
        .select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| candidate.link.join(src.trim()).ok())
        .map(String::from);

    let title = document
        .select(&TITLE)
        .next()
        .map(|h| squash_whitespace(&h.text().collect::<String>()))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| candidate.title.clone());

    let pub_date = match document.select(&DATE).next() {
        Some(p) => parse_detail_date(&p.text().collect::<String>())?,
        None => candidate.pub_date.ok_or_else(|| missing("publish date"))?,
    };

    debug!(
        %title,
        %pub_date,
        has_image = image.is_some(),
        preview = %truncate_for_log(body_text.trim(), 80),
        "Parsed detail page"
    );

    Ok(EnrichedItem {
        title,
        link: candidate.link.to_string(),
        pub_date,
        description: body_html.clone(),
        content: ItemContent {
            html: body_html,
            text: body_text,
        },
        banner: image.clone(),
        image,
        language,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use url::Url;

    fn candidate() -> ListingCandidate {
        ListingCandidate {
            title: "列表标题".to_string(),
            raw_pub_date: "2024-05-20".to_string(),
            pub_date: Some(DateTime::parse_from_rfc3339("2024-05-20T00:00:00+00:00").unwrap()),
            link: Url::parse("https://speed.qq.com/webplat/info/news_version3/147/14551/m22621/202405/7.shtml")
                .unwrap(),
        }
    }

    const DETAIL: &str = r#"<html><body>
        <div class="news-details-title"><h4> 新赛季 S12 开启 </h4></div>
        <p class="news-details-p1">  2024-05-20 10:30:00 </p>
        <div class="news-details-cont"><p>赛季奖励</p><img src="../img/banner.jpg"><img src="https://game.gtimg.cn/b.jpg"></div>
        </body></html>"#;

    #[test]
    fn test_detail_overrides_listing_fields() {
        let item = parse_detail(DETAIL, candidate(), Some("zh-CN".to_string())).unwrap();
        assert_eq!(item.title, "新赛季 S12 开启");
        assert_eq!(item.pub_date.to_rfc3339(), "2024-05-20T10:30:00+08:00");
        assert_eq!(item.content.text, "赛季奖励");
        assert!(item.content.html.starts_with("<p>赛季奖励</p><img"));
        assert_eq!(item.description, item.content.html);
        assert_eq!(item.language.as_deref(), Some("zh-CN"));
    }

    #[test]
    fn test_first_image_is_absolute_and_used_as_banner() {
        let item = parse_detail(DETAIL, candidate(), None).unwrap();
        assert_eq!(
            item.image.as_deref(),
            Some("https://speed.qq.com/webplat/info/news_version3/147/14551/m22621/img/banner.jpg")
        );
        assert_eq!(item.banner, item.image);
    }

    #[test]
    fn test_missing_content_is_extraction_error() {
        let err = parse_detail("<html><body><h4>x</h4></body></html>", candidate(), None).unwrap_err();
        assert!(matches!(err, FeedError::Extraction { field: "content container", .. }));
    }

    #[test]
    fn test_fallbacks_to_listing_title_and_date() {
        let html = r#"<div class="news-details-cont">只有正文</div>"#;
        let item = parse_detail(html, candidate(), None).unwrap();
        assert_eq!(item.title, "列表标题");
        assert_eq!(item.pub_date, candidate().pub_date.unwrap());
        assert_eq!(item.image, None);
    }

    #[test]
    fn test_no_date_anywhere_is_extraction_error() {
        let mut stub = candidate();
        stub.pub_date = None;
        let err = parse_detail(r#"<div class="news-details-cont">x</div>"#, stub, None).unwrap_err();
        assert!(matches!(err, FeedError::Extraction { field: "publish date", .. }));
    }

    #[test]
    fn test_unrecognized_detail_date_is_fatal() {
        let html = r#"<p class="news-details-p1">很久以前</p><div class="news-details-cont">x</div>"#;
        let err = parse_detail(html, candidate(), None).unwrap_err();
        assert!(matches!(err, FeedError::DateParse(_)));
    }
}
