use anyhow::{Context, Result};
use chrono::Utc;
use std::{fs, path::Path};
use thirtyfour::prelude::*;

pub fn artifacts_dir(base: &str, browser: &str, dataset: &str) -> String {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{browser}/{dataset}/{ts}")
}

/// Save what the browser was showing when a dataset failed.
pub async fn capture_artifacts(driver: &WebDriver, dir: &str, err: &anyhow::Error) -> Result<()> {
    let screenshot = driver.screenshot_as_png().await.ok();
    let source = driver.source().await.ok();
    let page = driver
        .current_url()
        .await
        .ok()
        .map(|url| serde_json::json!({ "url": url.to_string() }));
    let chain = format!("{err:#}");

    write_artifact_files(
        Path::new(dir),
        screenshot.as_deref(),
        source.as_deref(),
        page.as_ref(),
        &chain,
    )
}

fn write_artifact_files(
    dir: &Path,
    screenshot: Option<&[u8]>,
    source: Option<&str>,
    page: Option<&serde_json::Value>,
    error_chain: &str,
) -> Result<()> {
    fs::create_dir_all(dir).context("creating artifacts dir")?;

    if let Some(png) = screenshot {
        let _ = fs::write(dir.join("screenshot.png"), png);
    }

    if let Some(src) = source {
        let _ = fs::write(dir.join("dom.html"), src);
    }

    if let Some(page_json) = page {
        let payload = serde_json::to_vec_pretty(page_json).unwrap_or_default();
        let _ = fs::write(dir.join("page.json"), payload);
    }

    let _ = fs::write(dir.join("error.txt"), error_chain);

    Ok(())
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}
