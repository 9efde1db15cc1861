use std::time::Duration;
use thirtyfour::prelude::*;

use super::identity::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BrowserKind {
    Chrome,
    Edge,
    Firefox,
    Safari,
}

impl BrowserKind {
    /// Local driver endpoint used when no hub is configured.
    pub const fn default_endpoint(self) -> &'static str {
        match self {
            Self::Chrome => "http://localhost:9515",
            Self::Edge => "http://localhost:17556",
            Self::Firefox => "http://localhost:4444",
            Self::Safari => "http://localhost:4445",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub page_load_timeout: Duration,
    pub remote_hub: Option<String>,
    pub identity: Option<Identity>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            page_load_timeout: Duration::from_secs(120),
            remote_hub: None,
            identity: None,
        }
    }
}

impl BrowserConfig {
    fn endpoint(&self, kind: BrowserKind) -> &str {
        self.remote_hub
            .as_deref()
            .unwrap_or_else(|| kind.default_endpoint())
    }
}

pub async fn new_session(kind: BrowserKind, cfg: &BrowserConfig) -> WebDriverResult<WebDriver> {
    let url = cfg.endpoint(kind);
    let driver = match kind {
        BrowserKind::Chrome => {
            let mut caps = DesiredCapabilities::chrome();
            if cfg.headless {
                caps.set_headless()?;
            }
            if let Some(identity) = &cfg.identity {
                for arg in identity.chromium_args() {
                    caps.add_arg(&arg)?;
                }
            }
            WebDriver::new(url, caps).await?
        }
        BrowserKind::Edge => {
            let mut caps = DesiredCapabilities::edge();
            if cfg.headless {
                caps.set_headless()?;
            }
            if let Some(identity) = &cfg.identity {
                for arg in identity.chromium_args() {
                    caps.add_arg(&arg)?;
                }
            }
            WebDriver::new(url, caps).await?
        }
        BrowserKind::Firefox => {
            let mut caps = DesiredCapabilities::firefox();
            if cfg.headless {
                caps.set_headless()?;
            }
            WebDriver::new(url, caps).await?
        }
        BrowserKind::Safari => {
            let caps = DesiredCapabilities::safari();
            WebDriver::new(url, caps).await?
        }
    };

    // Segment lookups must report an empty view immediately instead of polling.
    driver.set_implicit_wait_timeout(Duration::ZERO).await?;
    driver.set_page_load_timeout(cfg.page_load_timeout).await?;
    Ok(driver)
}
