use std::fs::{self, File};
use std::path::Path;

use log::{debug, info};

use crate::error::ToolError;

/// Fetches a URL into a local file.
pub trait Downloader {
    /// Download `url` to `dest`, returning the number of bytes written.
    fn download(&self, url: &str, dest: &Path) -> Result<u64, ToolError>;
}

/// Blocking HTTP downloader.
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self, ToolError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("swagfix/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ToolError::HttpClient)?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64, ToolError> {
        info!("downloading {url} -> {}", dest.display());
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|source| ToolError::Download {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::DownloadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file = File::create(dest).map_err(|source| ToolError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
        match response.copy_to(&mut file) {
            Ok(bytes) => {
                debug!("wrote {bytes} bytes to {}", dest.display());
                Ok(bytes)
            }
            Err(source) => {
                drop(file);
                // A truncated executable would be taken as installed next time.
                let _ = fs::remove_file(dest);
                Err(ToolError::Download {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}
