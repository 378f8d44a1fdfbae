//! News center categories.
//!
//! The site exposes four sections. Each id resolves to a listing path and a
//! display label through two separate lookups, each with its own fallback:
//! an unknown id always lands on the general listing, and independently
//! renders the general label.

/// The general ("综合") section, used when no category is given.
pub const DEFAULT_CATEGORY: &str = "14551";

/// Ids the site is known to serve.
pub const KNOWN_CATEGORIES: [&str; 4] = ["14551", "14578", "14585", "61459"];

const GENERAL_PATH: &str = "webplat/info/news_version3/147/14551/m22621/list_1.shtml";

/// Listing path (relative to the site root) for a category id.
pub fn listing_path(id: &str) -> &'static str {
    match id {
        "14578" => "webplat/info/news_version3/147/14551/14572/14578/m22621/list_1.shtml",
        "14585" => "webplat/info/news_version3/147/14551/14572/14585/m22621/list_1.shtml",
        "61459" => "webplat/info/news_version3/147/14551/61459/m22621/list_1.shtml",
        _ => GENERAL_PATH,
    }
}

/// Human-readable label for a category id.
pub fn display_name(id: &str) -> &'static str {
    match id {
        "14578" => "活动",
        "14585" => "公告",
        "61459" => "赛事",
        _ => "综合",
    }
}

pub fn is_known(id: &str) -> bool {
    KNOWN_CATEGORIES.contains(&id)
}

/// A category id together with its resolved path and label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub id: String,
    pub listing_path: &'static str,
    pub display_name: &'static str,
}

impl CategorySpec {
    /// Resolve an optional id; `None` means [`DEFAULT_CATEGORY`].
    ///
    /// The id is kept verbatim even when it is not one of
    /// [`KNOWN_CATEGORIES`].
    pub fn resolve(id: Option<&str>) -> Self {
        let id = id.unwrap_or(DEFAULT_CATEGORY);
        Self {
            id: id.to_string(),
            listing_path: listing_path(id),
            display_name: display_name(id),
        }
    }
}
