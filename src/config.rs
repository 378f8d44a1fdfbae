//! Runtime settings.
//!
//! Defaults target the live site. A YAML file may override any subset of
//! fields:
//!
//! ```yaml
//! timeout_secs: 10
//! concurrency: 4
//! cache_ttl_secs: 1800
//! ```

use crate::error::{FeedError, FeedResult};
use serde::Deserialize;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root every listing path and relative article link is resolved against.
    pub root_url: String,
    /// Host of the static image CDN.
    pub image_root_url: String,
    /// Feed logo, relative to `image_root_url`.
    pub logo_path: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Detail pages resolved at once.
    pub concurrency: usize,
    /// How long a resolved article stays cached. `None` keeps it for the
    /// life of the process.
    pub cache_ttl_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_url: "https://speed.qq.com/".to_string(),
            image_root_url: "https://game.gtimg.cn/".to_string(),
            logo_path: "images/speed/web202305/logo.png".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            concurrency: 12,
            cache_ttl_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file, or defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> FeedResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).await?;
        let settings = Self::from_yaml(&raw)?;
        info!(path, "Loaded settings");
        Ok(settings)
    }

    pub fn from_yaml(raw: &str) -> FeedResult<Self> {
        let settings: Self =
            serde_yaml::from_str(raw).map_err(|e| FeedError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> FeedResult<()> {
        if self.concurrency == 0 {
            return Err(FeedError::Config("concurrency must be at least 1".to_string()));
        }
        self.root()?;
        self.logo_url()?;
        Ok(())
    }

    pub fn root(&self) -> FeedResult<Url> {
        Ok(Url::parse(&self.root_url)?)
    }

    /// Fixed feed logo, independent of any article image.
    pub fn logo_url(&self) -> FeedResult<Url> {
        Ok(Url::parse(&self.image_root_url)?.join(&self.logo_path)?)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }
}
