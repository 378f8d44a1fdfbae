//! Command-line interface definitions.
//!
//! All options can be given as flags; the settings file may also come from
//! the environment.

use crate::category::DEFAULT_CATEGORY;
use crate::feed::DEFAULT_LIMIT;
use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};

/// Output format for the generated feed.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Rss,
    Json,
}

/// Generate a feed from the QQ Speed news center.
///
/// # Examples
///
/// ```sh
/// # General news as RSS on stdout
/// speed_news
///
/// # Announcements, 5 articles, as JSON into a file
/// speed_news 14585 -l 5 --format json -o announcements.json
///
/// # Regenerate every 10 minutes, reusing already fetched articles
/// speed_news 14578 -o events.xml --interval 600
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Category id: 14551 (综合), 14578 (活动), 14585 (公告), 61459 (赛事)
    #[arg(default_value = DEFAULT_CATEGORY)]
    pub category: String,

    /// Maximum number of articles in the feed
    #[arg(short, long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    pub limit: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Rss)]
    pub format: Format,

    /// Write the feed to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Optional path to a YAML settings file
    #[arg(short, long, env = "SPEED_NEWS_CONFIG")]
    pub config: Option<String>,

    /// Detail pages fetched at once (overrides the settings file)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Regenerate the feed every N seconds instead of exiting
    #[arg(long)]
    pub interval: Option<u64>,

    /// Print the known categories and exit
    #[arg(long)]
    pub list_categories: bool,
}
