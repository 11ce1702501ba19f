//! Download and caching of the distribution public key.
//!
//! Cached keys live under a content-addressed name derived from their source
//! URL, so different URLs never share a file. Writes go through a temp file
//! and an atomic rename, which keeps concurrent downloads from interleaving.
//! The cache carries no integrity guarantee beyond filesystem trust; every
//! download overwrites the previous copy.

use crate::error::{Result, SignError};
use crate::hash::cache_key;
use crate::signature::write_atomic;
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const USER_AGENT: &str = concat!("ovsx-sign/", env!("CARGO_PKG_VERSION"));

/// A directory of downloaded public keys.
#[derive(Debug, Clone)]
pub struct PublicKeyCache {
    dir: PathBuf,
}

impl PublicKeyCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// `<tmp>/ovsx-sign/keys`.
    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join("ovsx-sign").join("keys")
    }

    /// Cache location for the key served at `url`.
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.pem", cache_key(url).to_hex()))
    }

    /// Store `body` as the key for `url`, returning its path.
    pub fn store(&self, url: &str, body: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(url);
        write_atomic(&path, body)?;
        Ok(path)
    }
}

/// Fetch the public key at `url` into `cache` and return the local path.
pub fn download_public_key(cache: &PublicKeyCache, url: &str, timeout: Duration) -> Result<PathBuf> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    fetch_into_cache(&client, cache, url)
}

/// Single GET with `client`; non-success statuses are rejected before
/// anything is written.
pub fn fetch_into_cache(client: &Client, cache: &PublicKeyCache, url: &str) -> Result<PathBuf> {
    tracing::debug!(url, "downloading public key");

    let response = client.get(url).send().map_err(|e| {
        tracing::warn!(url, error = %e, "public key download failed");
        e
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url, status = status.as_u16(), "public key download rejected");
        return Err(SignError::DownloadStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes()?;
    let path = cache.store(url, &body)?;
    tracing::info!(url, path = %path.display(), bytes = body.len(), "cached public key");
    Ok(path)
}
