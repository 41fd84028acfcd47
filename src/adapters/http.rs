use crate::domain::ports::ArchiveFetcher;
use crate::utils::error::{Result, ScaffoldError};
use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Downloads archives over HTTP(S), writing the body to disk chunk by chunk.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_timeout(timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArchiveFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        tracing::debug!("Making request to: {}", url);
        let mut response = self.client.get(url).send().await?;

        tracing::debug!("Response status: {}", response.status());
        if !response.status().is_success() {
            return Err(ScaffoldError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!("Wrote {} bytes to {}", written, dest.display());
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fetch_writes_body_to_file() {
        let server = MockServer::start();
        let body = vec![7u8; 64 * 1024];

        let archive_mock = server.mock(|when, then| {
            when.method(GET).path("/archive/master.zip");
            then.status(200)
                .header("Content-Type", "application/zip")
                .body(body.clone());
        });

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("download.zip");
        let written = HttpFetcher::new()
            .fetch(&server.url("/archive/master.zip"), &dest)
            .await
            .unwrap();

        archive_mock.assert();
        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let server = MockServer::start();
        let missing = server.mock(|when, then| {
            when.method(GET).path("/missing.zip");
            then.status(404);
        });

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("download.zip");
        let err = HttpFetcher::new()
            .fetch(&server.url("/missing.zip"), &dest)
            .await
            .unwrap_err();

        missing.assert();
        assert!(matches!(err, ScaffoldError::HttpStatus { status: 404, .. }));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_unwritable_destination_is_io_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/a.zip");
            then.status(200).body("zip");
        });

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("no-such-dir").join("download.zip");
        let err = HttpFetcher::new()
            .fetch(&server.url("/a.zip"), &dest)
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Io(_)));
    }
}
