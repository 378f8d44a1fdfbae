//! In-memory stand-in for the news center, serving GBK-encoded fixtures.

use crate::error::{FeedError, FeedResult};
use crate::fetcher::Fetcher;
use encoding_rs::GBK;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

#[derive(Debug, Default)]
pub struct FakeSite {
    pages: HashMap<String, (Vec<u8>, Duration)>,
    hits: Mutex<HashMap<String, usize>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, html: &str) -> Self {
        self.slow_page(url, html, Duration::ZERO)
    }

    pub fn slow_page(self, url: &str, html: &str, delay: Duration) -> Self {
        let (bytes, _, had_errors) = GBK.encode(html);
        assert!(!had_errors, "fixture is not representable in GBK");
        self.raw_page(url, bytes.into_owned(), delay)
    }

    pub fn raw_page(mut self, url: &str, bytes: Vec<u8>, delay: Duration) -> Self {
        self.pages.insert(url.to_string(), (bytes, delay));
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

impl Fetcher for FakeSite {
    async fn fetch_bytes(&self, url: &Url) -> FeedResult<Vec<u8>> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_default() += 1;
        let (bytes, delay) = self
            .pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FeedError::Fetch {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            })?;
        tokio::time::sleep(delay).await;
        Ok(bytes)
    }
}

/// A listing page linking to `hrefs`, titled `QQ飞车官方网站-腾讯游戏`.
pub fn listing_html(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .enumerate()
        .map(|(i, href)| {
            format!(
                r#"<li class="list-item"><a class="clearfix" href="{href}"><p>列表 {i}</p><span class="date">05-20</span></a></li>"#
            )
        })
        .collect();
    format!(
        r#"<!DOCTYPE html><html lang="zh-CN"><head><meta charset="gbk"><title>QQ飞车官方网站-腾讯游戏</title>
        <meta name="Description" content="QQ飞车资讯中心"><meta name="author" content="腾讯游戏"></head>
        <body><div class="news-list-item"><ul>{items}</ul></div></body></html>"#
    )
}

pub fn detail_html(title: &str, date: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="gbk"></head><body>
        <div class="news-details-title"><h4>{title}</h4></div>
        <p class="news-details-p1">{date}</p>
        <div class="news-details-cont"><p>{title}正文</p><img src="/images/{title}.jpg"></div>
        </body></html>"#
    )
}
