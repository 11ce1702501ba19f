//! Loading of PEM-encoded Ed25519 keys.
//!
//! Keys are read as text and kept in PEM form. Parsing happens only when a
//! key is used, so a malformed file surfaces as a signing or verification
//! error rather than a load error.

use crate::error::Result;
use ed25519_dalek::pkcs8::{DecodePrivateKey, DecodePublicKey};
use ed25519_dalek::{SigningKey, VerifyingKey};
use std::fmt;
use std::fs;
use std::path::Path;

/// A PKCS#8 PEM private key, used only for signing.
#[derive(Clone)]
pub struct PrivateKey {
    pem: String,
}

impl PrivateKey {
    /// Wrap PEM text without validating it.
    pub fn from_pem<S: Into<String>>(pem: S) -> Self {
        Self { pem: pem.into() }
    }

    /// Read a private key file as UTF-8 text.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let pem = fs::read_to_string(path)?;
        Ok(Self { pem })
    }

    /// The PEM text.
    pub fn as_pem(&self) -> &str {
        &self.pem
    }

    /// Parse the PEM into an Ed25519 signing key.
    pub fn signing_key(&self) -> Result<SigningKey> {
        Ok(SigningKey::from_pkcs8_pem(&self.pem)?)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

/// An SPKI PEM public key, used only for verification.
#[derive(Debug, Clone)]
pub struct PublicKey {
    pem: String,
}

impl PublicKey {
    /// Wrap PEM text without validating it.
    pub fn from_pem<S: Into<String>>(pem: S) -> Self {
        Self { pem: pem.into() }
    }

    /// Read a public key file as UTF-8 text.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let pem = fs::read_to_string(path)?;
        Ok(Self { pem })
    }

    /// The PEM text.
    pub fn as_pem(&self) -> &str {
        &self.pem
    }

    /// Parse the PEM into an Ed25519 verifying key.
    pub fn verifying_key(&self) -> Result<VerifyingKey> {
        Ok(VerifyingKey::from_public_key_pem(&self.pem)?)
    }
}

/// Load a private key from `path`.
pub fn load_private_key<P: AsRef<Path>>(path: P) -> Result<PrivateKey> {
    PrivateKey::load_from_file(path)
}

/// Load a public key from `path`.
pub fn load_public_key<P: AsRef<Path>>(path: P) -> Result<PublicKey> {
    PublicKey::load_from_file(path)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{PrivateKey, PublicKey};
    use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
    use ed25519_dalek::pkcs8::{EncodePrivateKey, EncodePublicKey};
    use ed25519_dalek::SigningKey;
    use rand::rngs::OsRng;

    /// A freshly generated keypair in PEM form.
    pub(crate) fn keypair() -> (PrivateKey, PublicKey) {
        let signing_key = SigningKey::generate(&mut OsRng);
        let private_pem = signing_key.to_pkcs8_pem(LineEnding::LF).unwrap();
        let public_pem = signing_key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap();
        (
            PrivateKey::from_pem(private_pem.as_str()),
            PublicKey::from_pem(public_pem),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignError;

    #[test]
    fn test_load_roundtrip() {
        let (private_key, public_key) = test_support::keypair();
        let dir = tempfile::tempdir().unwrap();
        let private_path = dir.path().join("private.pem");
        let public_path = dir.path().join("public.pem");
        fs::write(&private_path, private_key.as_pem()).unwrap();
        fs::write(&public_path, public_key.as_pem()).unwrap();

        let loaded_private = load_private_key(&private_path).unwrap();
        let loaded_public = load_public_key(&public_path).unwrap();

        assert_eq!(loaded_private.as_pem(), private_key.as_pem());
        assert_eq!(
            loaded_private.signing_key().unwrap().verifying_key(),
            loaded_public.verifying_key().unwrap()
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_private_key(dir.path().join("missing.pem"));
        assert!(matches!(result, Err(SignError::Io(_))));
    }

    #[test]
    fn test_malformed_pem_loads_but_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.pem");
        fs::write(&path, "not a key").unwrap();

        let private_key = load_private_key(&path).unwrap();
        assert!(matches!(
            private_key.signing_key(),
            Err(SignError::PrivateKey(_))
        ));

        let public_key = load_public_key(&path).unwrap();
        assert!(matches!(
            public_key.verifying_key(),
            Err(SignError::PublicKey(_))
        ));
    }

    #[test]
    fn test_public_pem_is_not_a_private_key() {
        let (_, public_key) = test_support::keypair();
        let misused = PrivateKey::from_pem(public_key.as_pem());
        assert!(misused.signing_key().is_err());
    }

    #[test]
    fn test_debug_hides_private_material() {
        let (private_key, _) = test_support::keypair();
        let rendered = format!("{:?}", private_key);
        assert!(!rendered.contains("BEGIN"));
    }
}
