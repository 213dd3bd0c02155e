use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::error::PrepError;

#[derive(Debug, Clone, Copy)]
pub struct DownloadInfo {
    pub bytes: u64,
}

/// Retrieves a remote resource onto a local path in a single attempt.
pub trait DatasetClient: Send + Sync {
    fn download(&self, url: &str, destination: &Path) -> Result<DownloadInfo, PrepError>;
}

#[derive(Clone)]
pub struct HttpDatasetClient {
    client: Client,
}

impl HttpDatasetClient {
    pub fn new() -> Result<Self, PrepError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("prepare-data/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| PrepError::Http(err.to_string()))?,
        );
        // Archives run to several gigabytes, so only the connect phase is bounded.
        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(30))
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| PrepError::Http(err.to_string()))?;
        Ok(Self { client })
    }

    fn handle_status(
        response: reqwest::blocking::Response,
        url: &str,
    ) -> Result<reqwest::blocking::Response, PrepError> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(PrepError::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        })
    }
}

impl DatasetClient for HttpDatasetClient {
    fn download(&self, url: &str, destination: &Path) -> Result<DownloadInfo, PrepError> {
        let parent = destination
            .parent()
            .ok_or_else(|| PrepError::Filesystem("invalid download destination".to_string()))?;
        tracing::debug!(url, destination = %destination.display(), "sending request");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| PrepError::Http(err.to_string()))?;
        let mut response = Self::handle_status(response, url)?;

        let mut temp = tempfile::Builder::new()
            .prefix(".download")
            .tempfile_in(parent)
            .map_err(|err| PrepError::Filesystem(err.to_string()))?;
        let bytes = std::io::copy(&mut response, temp.as_file_mut())
            .map_err(|err| PrepError::Http(format!("reading body of {url}: {err}")))?;

        if destination.exists() {
            fs::remove_file(destination).map_err(|err| PrepError::Filesystem(err.to_string()))?;
        }
        temp.persist(destination)
            .map_err(|err| PrepError::Filesystem(err.to_string()))?;
        tracing::debug!(url, bytes, "response body written");
        Ok(DownloadInfo { bytes })
    }
}
