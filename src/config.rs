//! Config module.
//! Loads the certificate template catalog from config.json (local file
//! preferred, remote fetch otherwise) and deserializes it with serde.
//! One attempt only: any load or parse failure is fatal to the run.

use crate::error::{CertError, Result};
use log::info;
use reqwest::Client;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Anchor coordinates in image pixel space.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// One certificate template: a display name, a pool of template image URLs,
/// and the two text anchors. A single-URL template is a one-element pool.
#[derive(Debug, Clone, Deserialize)]
pub struct CertificateTemplate {
    pub name: String,
    #[serde(rename = "namePos")]
    pub name_pos: Position,
    #[serde(rename = "codePos")]
    pub code_pos: Position,
    pub direct_links: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub certificates: Vec<CertificateTemplate>,
}

impl Config {
    /// Every template must carry at least one download link. An empty
    /// template list is allowed here; `main` handles it as a friendly exit.
    fn validate(&self) -> Result<()> {
        for template in &self.certificates {
            if template.direct_links.is_empty() {
                return Err(CertError::ConfigUnavailable(format!(
                    "template '{}' has no download links",
                    template.name
                )));
            }
        }
        Ok(())
    }
}

/// Loads the configuration, preferring the local file when it exists and
/// falling back to a single remote fetch.
pub async fn load_config(local_path: &Path, url: &str, client: &Client) -> Result<Config> {
    let config = if local_path.exists() {
        info!("loading configuration from {}", local_path.display());
        load_local(local_path)?
    } else {
        info!("local {} not found, fetching {}", local_path.display(), url);
        fetch_remote(url, client).await?
    };

    config.validate()?;
    Ok(config)
}

fn load_local(path: &Path) -> Result<Config> {
    let json = fs::read_to_string(path).map_err(|e| {
        CertError::ConfigUnavailable(format!("could not read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&json)
        .map_err(|e| CertError::ConfigUnavailable(format!("malformed config JSON: {}", e)))
}

async fn fetch_remote(url: &str, client: &Client) -> Result<Config> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CertError::ConfigUnavailable(format!("config fetch failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(CertError::ConfigUnavailable(format!(
            "config fetch returned HTTP {}",
            response.status()
        )));
    }

    response
        .json::<Config>()
        .await
        .map_err(|e| CertError::ConfigUnavailable(format!("malformed config JSON: {}", e)))
}

// *************** Tests ***************
