//! Template fetcher.
//! Downloads the chosen template image to a fixed working-directory path,
//! overwriting any previous temp file. The returned guard removes the file
//! on drop, so the temp template never outlives a render attempt.

use crate::error::{CertError, Result};
use log::{debug, warn};
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};

const TEMPLATE_TEMP_PATH: &str = "template.jpg";

/// Scoped handle to the downloaded template file.
#[derive(Debug)]
pub struct TempTemplate {
    path: PathBuf,
}

impl TempTemplate {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempTemplate {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("removed temp template {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove {}: {}", self.path.display(), e),
        }
    }
}

/// Downloads `url` into the working-directory temp file. A single attempt,
/// no retries.
pub async fn download_template(client: &Client, url: &str) -> Result<TempTemplate> {
    println!("Downloading template...");

    let response = client.get(url).send().await.map_err(|e| CertError::DownloadFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(CertError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response.bytes().await.map_err(|e| CertError::DownloadFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    fs::write(TEMPLATE_TEMP_PATH, &bytes).map_err(|e| CertError::DownloadFailed {
        url: url.to_string(),
        reason: format!("could not write {}: {}", TEMPLATE_TEMP_PATH, e),
    })?;

    debug!("wrote {} bytes to {}", bytes.len(), TEMPLATE_TEMP_PATH);
    Ok(TempTemplate::new(PathBuf::from(TEMPLATE_TEMP_PATH)))
}

// *************** Tests ***************

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_template_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.jpg");
        fs::write(&path, b"jpeg bytes").unwrap();

        {
            let _guard = TempTemplate::new(path.clone());
        }
        assert!(!path.exists(), "temp template leaked after drop");
    }

    #[test]
    fn test_drop_tolerates_already_removed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.jpg");
        fs::write(&path, b"jpeg bytes").unwrap();

        let guard = TempTemplate::new(path.clone());
        fs::remove_file(&path).unwrap();
        drop(guard); // must not panic
    }

    #[tokio::test]
    async fn test_download_failure_maps_to_download_failed() {
        let client = Client::new();
        let err = download_template(&client, "http://127.0.0.1:1/template.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, CertError::DownloadFailed { .. }));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_download_real_template() {
        let client = Client::new();
        let temp = download_template(&client, "https://httpbin.org/image/jpeg")
            .await
            .unwrap();
        assert!(temp.path().exists());
    }
}
