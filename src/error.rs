//! Error types for the ovsx-sign library.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ovsx-sign operations.
#[derive(Error, Debug)]
pub enum SignError {
    /// Error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error moving a freshly written temp file into place.
    #[error("I/O error: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// The private key PEM could not be parsed as a PKCS#8 Ed25519 key.
    #[error("Invalid private key: {0}")]
    PrivateKey(#[from] ed25519_dalek::pkcs8::Error),

    /// The public key PEM could not be parsed as an SPKI Ed25519 key.
    #[error("Invalid public key: {0}")]
    PublicKey(#[from] ed25519_dalek::pkcs8::spki::Error),

    /// Error issuing the public key download.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The public key endpoint answered with a non-success status.
    #[error("Public key download from {url} failed with status {status}")]
    DownloadStatus { url: String, status: u16 },

    /// The extension package file does not exist.
    #[error("Extension package not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    /// The signature archive file does not exist.
    #[error("Signature archive not found: {}", .0.display())]
    SignatureNotFound(PathBuf),

    /// Signature verification failed.
    #[error("Signature is not valid")]
    VerificationFailed,
}

/// Result type alias for ovsx-sign operations.
pub type Result<T> = std::result::Result<T, SignError>;
