//! Signature verification.

use crate::config::Config;
use crate::error::{Result, SignError};
use crate::hash::hash_bytes;
use crate::key_cache::{download_public_key, PublicKeyCache};
use crate::keys::{load_public_key, PublicKey};
use crate::signature::SignatureArtifact;
use ed25519_dalek::Signature;
use std::fs;
use std::path::{Path, PathBuf};

/// Exit code for a missing extension package.
pub const EXIT_PACKAGE_NOT_FOUND: u8 = 3;
/// Exit code for a missing signature archive.
pub const EXIT_SIGNATURE_NOT_FOUND: u8 = 6;
/// Exit code for a signature that does not validate.
pub const EXIT_INVALID_SIGNATURE: u8 = 102;
/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Verifies detached signatures against a public key.
#[derive(Debug)]
pub struct Verifier<'a> {
    public_key: &'a PublicKey,
}

impl<'a> Verifier<'a> {
    /// Create a verifier for the given public key.
    pub fn new(public_key: &'a PublicKey) -> Self {
        Self { public_key }
    }

    /// Check `signature` over `package`.
    ///
    /// Returns `Ok(false)` for any mismatch, including a signature of the
    /// wrong length. Errors only when the public key cannot be parsed.
    pub fn verify_bytes(&self, package: &[u8], signature: &SignatureArtifact) -> Result<bool> {
        let verifying_key = self.public_key.verifying_key()?;

        let signature = match Signature::from_slice(signature.as_bytes()) {
            Ok(signature) => signature,
            Err(e) => {
                tracing::debug!(error = %e, "malformed signature bytes");
                return Ok(false);
            }
        };

        let valid = verifying_key.verify_strict(package, &signature).is_ok();
        tracing::debug!(
            package_len = package.len(),
            package_digest = %hash_bytes(package).short(),
            valid,
            "checked signature"
        );
        Ok(valid)
    }
}

/// Check a detached signature over `package` with `public_key`.
pub fn verify_signature(
    package: &[u8],
    public_key: &PublicKey,
    signature: &SignatureArtifact,
) -> Result<bool> {
    Verifier::new(public_key).verify_bytes(package, signature)
}

/// Inputs of the `verify` flow.
#[derive(Debug, Clone)]
pub struct VerifyRequest {
    pub package: PathBuf,
    pub signature: PathBuf,
    /// Explicit public key file. When absent the key is downloaded.
    pub public_key: Option<PathBuf>,
}

/// Result of the `verify` flow.
#[derive(Debug)]
pub enum VerifyOutcome {
    Valid,
    InvalidSignature,
    PackageNotFound(PathBuf),
    SignatureNotFound(PathBuf),
    Infrastructure(SignError),
}

impl VerifyOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            VerifyOutcome::Valid => 0,
            VerifyOutcome::InvalidSignature => EXIT_INVALID_SIGNATURE,
            VerifyOutcome::PackageNotFound(_) => EXIT_PACKAGE_NOT_FOUND,
            VerifyOutcome::SignatureNotFound(_) => EXIT_SIGNATURE_NOT_FOUND,
            VerifyOutcome::Infrastructure(_) => EXIT_FAILURE,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, VerifyOutcome::Valid)
    }

    /// Collapse the outcome into a `Result` for library callers.
    pub fn into_result(self) -> Result<()> {
        match self {
            VerifyOutcome::Valid => Ok(()),
            VerifyOutcome::InvalidSignature => Err(SignError::VerificationFailed),
            VerifyOutcome::PackageNotFound(path) => Err(SignError::PackageNotFound(path)),
            VerifyOutcome::SignatureNotFound(path) => Err(SignError::SignatureNotFound(path)),
            VerifyOutcome::Infrastructure(e) => Err(e),
        }
    }
}

impl From<SignError> for VerifyOutcome {
    fn from(e: SignError) -> Self {
        VerifyOutcome::Infrastructure(e)
    }
}

/// Run the `verify` flow: check inputs exist, resolve the public key, read
/// both files and check the signature. Nothing is retried.
pub fn verify_package(request: &VerifyRequest, config: &Config) -> VerifyOutcome {
    if !request.package.exists() {
        tracing::debug!(path = %request.package.display(), "extension package missing");
        return VerifyOutcome::PackageNotFound(request.package.clone());
    }
    if !request.signature.exists() {
        tracing::debug!(path = %request.signature.display(), "signature archive missing");
        return VerifyOutcome::SignatureNotFound(request.signature.clone());
    }

    match check_files(request, config) {
        Ok(true) => {
            tracing::info!(package = %request.package.display(), "signature is valid");
            VerifyOutcome::Valid
        }
        Ok(false) => {
            tracing::info!(package = %request.package.display(), "signature is not valid");
            VerifyOutcome::InvalidSignature
        }
        Err(e) => VerifyOutcome::Infrastructure(e),
    }
}

fn check_files(request: &VerifyRequest, config: &Config) -> Result<bool> {
    let public_key = resolve_public_key(request.public_key.as_deref(), config)?;
    let package = fs::read(&request.package)?;
    let signature = SignatureArtifact::load(&request.signature)?;
    verify_signature(&package, &public_key, &signature)
}

/// Load the explicit key file if one was given, otherwise download the
/// configured key into the cache and load it from there.
fn resolve_public_key(explicit: Option<&Path>, config: &Config) -> Result<PublicKey> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let cache = PublicKeyCache::new(&config.cache_dir);
            download_public_key(&cache, &config.public_key_url, config.timeout)?
        }
    };
    load_public_key(path)
}
