//! Failure taxonomy for the certificate pipeline.
//! Invalid menu input is not represented here: the selection prompt absorbs
//! it by re-prompting and never produces an error value.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertError {
    #[error("configuration unavailable: {0}")]
    ConfigUnavailable(String),

    #[error("template download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("embedded font resource '{0}' is missing or unreadable")]
    FontResourceMissing(&'static str),

    #[error("could not load template image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not write certificate image {}: {source}", path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, CertError>;
