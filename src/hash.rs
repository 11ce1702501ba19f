//! BLAKE3 digests used for package fingerprints and cache keys.

use std::fmt;

/// The size of a BLAKE3 hash output in bytes.
pub const HASH_SIZE: usize = 32;

/// A BLAKE3 digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest([u8; HASH_SIZE]);

impl Digest {
    /// Encode the digest as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// First eight hex characters, for log lines.
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(8);
        hex
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute the BLAKE3 digest of a byte slice.
pub fn hash_bytes(data: &[u8]) -> Digest {
    Digest(*blake3::hash(data).as_bytes())
}

/// Cache key for a remote resource: the digest of its URL.
pub fn cache_key(url: &str) -> Digest {
    hash_bytes(url.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_bytes() {
        let data = b"Hello, World!";
        let hash = hash_bytes(data);

        assert_eq!(hash, hash_bytes(data));
        assert_ne!(hash, hash_bytes(b"Different data"));
    }

    #[test]
    fn test_hex_encoding() {
        let hash = hash_bytes(b"Test");
        let hex = hash.to_hex();

        // 32 bytes * 2
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash.to_string(), hex);
        assert!(hex.starts_with(&hash.short()));
    }

    #[test]
    fn test_cache_key_depends_on_url() {
        let a = cache_key("https://example.com/a.pem");
        let b = cache_key("https://example.com/b.pem");

        assert_ne!(a, b);
        assert_eq!(a, cache_key("https://example.com/a.pem"));
    }
}
