//! RSS 2.0 rendering.

use crate::error::{FeedError, FeedResult};
use crate::models::{EnrichedItem, FeedEnvelope};
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};

/// Render a feed as an RSS 2.0 document.
///
/// Article bodies go into CDATA-wrapped `<description>`s; the first article
/// image, when present, becomes an `<enclosure>`.
pub fn to_rss(feed: &FeedEnvelope) -> FeedResult<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    emit(
        &mut writer,
        Event::Start(BytesStart::new("rss").with_attributes([("version", "2.0")])),
    )?;
    emit(&mut writer, Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &feed.title)?;
    text_element(&mut writer, "link", &feed.link)?;
    text_element(
        &mut writer,
        "description",
        feed.description.as_deref().unwrap_or(&feed.title),
    )?;
    if let Some(language) = &feed.language {
        text_element(&mut writer, "language", language)?;
    }
    if let Some(author) = &feed.author {
        text_element(&mut writer, "managingEditor", author)?;
    }
    text_element(&mut writer, "generator", env!("CARGO_PKG_NAME"))?;

    emit(&mut writer, Event::Start(BytesStart::new("image")))?;
    text_element(&mut writer, "url", &feed.image)?;
    text_element(&mut writer, "title", &feed.title)?;
    text_element(&mut writer, "link", &feed.link)?;
    emit(&mut writer, Event::End(BytesEnd::new("image")))?;

    for item in &feed.item {
        write_item(&mut writer, item)?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("channel")))?;
    emit(&mut writer, Event::End(BytesEnd::new("rss")))?;

    String::from_utf8(writer.into_inner().into_inner()).map_err(|e| FeedError::Xml(e.to_string()))
}

fn write_item<W: Write>(writer: &mut Writer<W>, item: &EnrichedItem) -> FeedResult<()> {
    emit(writer, Event::Start(BytesStart::new("item")))?;
    text_element(writer, "title", &item.title)?;
    text_element(writer, "link", &item.link)?;
    emit(
        writer,
        Event::Start(BytesStart::new("guid").with_attributes([("isPermaLink", "true")])),
    )?;
    emit(writer, Event::Text(BytesText::new(&item.link)))?;
    emit(writer, Event::End(BytesEnd::new("guid")))?;
    text_element(writer, "pubDate", &item.pub_date.to_rfc2822())?;

    // A literal "]]>" would end the section early; split it across two.
    let body = item.description.replace("]]>", "]]]]><![CDATA[>");
    emit(writer, Event::Start(BytesStart::new("description")))?;
    emit(writer, Event::CData(BytesCData::new(body)))?;
    emit(writer, Event::End(BytesEnd::new("description")))?;

    if let Some(image) = &item.image {
        emit(
            writer,
            Event::Empty(BytesStart::new("enclosure").with_attributes([
                ("url", image.as_str()),
                ("type", "image/jpeg"),
                ("length", "0"),
            ])),
        )?;
    }
    emit(writer, Event::End(BytesEnd::new("item")))
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> FeedResult<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> FeedResult<()> {
    writer
        .write_event(event)
        .map_err(|e| FeedError::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemContent;
    use chrono::DateTime;

    fn feed(items: Vec<EnrichedItem>) -> FeedEnvelope {
        FeedEnvelope {
            title: "QQ飞车官方网站 - 公告".to_string(),
            description: Some("资讯 & 公告".to_string()),
            link: "https://speed.qq.com/list_1.shtml".to_string(),
            item: items,
            allow_empty: true,
            image: "https://game.gtimg.cn/images/speed/web202305/logo.png".to_string(),
            author: Some("腾讯游戏".to_string()),
            language: Some("zh-CN".to_string()),
        }
    }

    fn item(body: &str, image: Option<&str>) -> EnrichedItem {
        EnrichedItem {
            title: "新赛季".to_string(),
            link: "https://speed.qq.com/1.shtml".to_string(),
            pub_date: DateTime::parse_from_rfc3339("2024-05-20T10:30:00+08:00").unwrap(),
            description: body.to_string(),
            content: ItemContent {
                html: body.to_string(),
                text: String::new(),
            },
            image: image.map(str::to_string),
            banner: image.map(str::to_string),
            language: None,
        }
    }

    #[test]
    fn test_channel_metadata() {
        let xml = to_rss(&feed(vec![])).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel>"#));
        assert!(xml.contains("<title>QQ飞车官方网站 - 公告</title>"));
        assert!(xml.contains("<description>资讯 &amp; 公告</description>"));
        assert!(xml.contains("<language>zh-CN</language>"));
        assert!(xml.contains("<url>https://game.gtimg.cn/images/speed/web202305/logo.png</url>"));
        assert!(!xml.contains("<item>"));
        assert!(xml.ends_with("</channel></rss>"));
    }

    #[test]
    fn test_item_rendering() {
        let xml = to_rss(&feed(vec![item("<p>正文</p>", Some("https://game.gtimg.cn/a.jpg"))])).unwrap();
        assert!(xml.contains("<pubDate>Mon, 20 May 2024 10:30:00 +0800</pubDate>"));
        assert!(xml.contains("<description><![CDATA[<p>正文</p>]]></description>"));
        assert!(xml.contains(r#"<guid isPermaLink="true">https://speed.qq.com/1.shtml</guid>"#));
        assert!(xml.contains(r#"<enclosure url="https://game.gtimg.cn/a.jpg" type="image/jpeg" length="0"/>"#));
    }

    #[test]
    fn test_cdata_terminator_is_split() {
        let xml = to_rss(&feed(vec![item("a]]>b", None)])).unwrap();
        assert!(xml.contains("<![CDATA[a]]]]><![CDATA[>b]]>"));
        assert!(!xml.contains("<enclosure"));
    }
}
