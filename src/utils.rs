//! Small string helpers shared by the scrapers and logging.

/// Truncate a string for logging purposes.
///
/// Keeps at most `max` characters (not bytes, so multi-byte text is never cut
/// mid-character) and appends how many bytes were dropped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("飞车飞车", 2), "飞车…(+6 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// The site name from a page `<title>`: everything before the first hyphen.
///
/// `"QQ飞车官方网站-腾讯游戏"` becomes `"QQ飞车官方网站"`.
pub fn site_title(page_title: &str) -> &str {
    page_title.split('-').next().unwrap_or_default().trim()
}

/// Collapse runs of whitespace in scraped text into single spaces.
pub fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
