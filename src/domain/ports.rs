use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Downloads a template archive to a local file.
#[async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Streams `url` into `dest` and returns the number of bytes written.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Asks the user for one value, offering `default` as the suggestion.
pub trait Prompter {
    fn ask(&mut self, label: &str, default: &str) -> Result<String>;
}
