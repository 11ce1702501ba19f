//! The detached signature artifact.
//!
//! The artifact is the raw output of the signing primitive, written verbatim.
//! It carries no envelope, version or algorithm tag; signer and verifier agree
//! on Ed25519 out of band.

use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::Path;

/// File name used when `sign` is given no output path.
pub const DEFAULT_SIGNATURE_FILE: &str = "extension.sigzip";

/// A detached signature over a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureArtifact {
    bytes: Vec<u8>,
}

impl SignatureArtifact {
    /// Wrap raw signature bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the artifact, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact to `path`.
    ///
    /// The bytes go to a temp file next to `path` which is then renamed into
    /// place, so a failed write never leaves a truncated artifact behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_atomic(path.as_ref(), &self.bytes)
    }

    /// Read an artifact from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self { bytes })
    }
}

/// Write `contents` to `path` through a temp file in the same directory.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
