//! QR code image URLs
//!
//! Rendering is delegated to a third-party HTTP endpoint. The webview loads
//! the URL directly; `download` saves the PNG for offline use.

use crate::core::{Error, QrConfig, Result};
use log::{debug, info};
use reqwest::Url;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

pub const SIZE_RANGE: RangeInclusive<u32> = 100..=1000;

/// `None` for empty payloads, sizes outside the range, or a malformed
/// endpoint in the configuration.
pub fn image_url(config: &QrConfig, data: &str, size: u32) -> Option<Url> {
    if data.trim().is_empty() || !SIZE_RANGE.contains(&size) {
        return None;
    }
    let dimensions = format!("{size}x{size}");
    Url::parse_with_params(&config.endpoint, [("size", dimensions.as_str()), ("data", data)]).ok()
}

/// Fetch the image and write it to `dir/qr-code.png`
pub async fn download(config: &QrConfig, data: &str, size: u32, dir: &Path) -> Result<PathBuf> {
    let url = image_url(config, data, size)
        .ok_or_else(|| Error::InvalidInput("QR content is empty or size is out of range".to_string()))?;
    debug!("Fetching QR image from {}", url);

    let client = reqwest::Client::builder()
        .user_agent(concat!("rabwa-toolbox/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let bytes = client.get(url).send().await?.error_for_status()?.bytes().await?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join("qr-code.png");
    tokio::fs::write(&path, &bytes).await?;
    info!("QR code saved to {:?} ({} bytes)", path, bytes.len());
    Ok(path)
}
