//! Package signing.

use crate::error::Result;
use crate::hash::hash_bytes;
use crate::keys::PrivateKey;
use crate::signature::SignatureArtifact;
use ed25519_dalek::Signer as DalekSigner;
use std::fs;
use std::path::Path;

/// Signs packages with a private key.
#[derive(Debug)]
pub struct Signer<'a> {
    private_key: &'a PrivateKey,
}

impl<'a> Signer<'a> {
    /// Create a new signer with the given private key.
    pub fn new(private_key: &'a PrivateKey) -> Self {
        Self { private_key }
    }

    /// Sign a byte slice.
    pub fn sign_bytes(&self, package: &[u8]) -> Result<SignatureArtifact> {
        let signing_key = self.private_key.signing_key()?;
        let signature = signing_key.sign(package);

        tracing::debug!(
            package_len = package.len(),
            package_digest = %hash_bytes(package).short(),
            "signed package"
        );

        Ok(SignatureArtifact::from_bytes(signature.to_bytes().to_vec()))
    }

    /// Read a package file fully and sign its contents.
    pub fn sign_path<P: AsRef<Path>>(&self, path: P) -> Result<SignatureArtifact> {
        let package = fs::read(path)?;
        self.sign_bytes(&package)
    }
}

/// Sign `package` with `private_key`, producing a detached signature.
pub fn sign_file(package: &[u8], private_key: &PrivateKey) -> Result<SignatureArtifact> {
    Signer::new(private_key).sign_bytes(package)
}
