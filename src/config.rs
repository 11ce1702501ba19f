//! Runtime configuration.

use crate::key_cache::PublicKeyCache;
use std::path::PathBuf;
use std::time::Duration;

/// Where the public key is fetched from when `verify` gets no key file.
pub const DEFAULT_PUBLIC_KEY_URL: &str = "https://open-vsx.org/keys/public.pem";

/// Default bound on the public key download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by the `sign` and `verify` flows.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the PEM public key used when none is supplied.
    pub public_key_url: String,
    /// Directory holding downloaded public keys.
    pub cache_dir: PathBuf,
    /// Timeout for the public key download.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_key_url: DEFAULT_PUBLIC_KEY_URL.to_string(),
            cache_dir: PublicKeyCache::default_dir(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    pub fn with_public_key_url<S: Into<String>>(mut self, url: S) -> Self {
        self.public_key_url = url.into();
        self
    }

    pub fn with_cache_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
