//! # ovsx-sign
//!
//! Detached Ed25519 signatures for extension packages.
//!
//! A package is signed with a PKCS#8 PEM private key, producing a raw
//! signature artifact (`extension.sigzip` by default) that lives next to the
//! package. Verification checks the artifact against an SPKI PEM public key,
//! either supplied by the caller or downloaded from a fixed URL into a local
//! cache.
//!
//! ## Sign a Package
//!
//! ```no_run
//! use ovsx_sign::{load_private_key, sign_file};
//!
//! let key = load_private_key("private.pem").unwrap();
//! let package = std::fs::read("extension.vsix").unwrap();
//!
//! let signature = sign_file(&package, &key).unwrap();
//! signature.save("extension.sigzip").unwrap();
//! ```
//!
//! ## Verify a Package
//!
//! ```no_run
//! use ovsx_sign::{load_public_key, verify_signature, SignatureArtifact};
//!
//! let key = load_public_key("public.pem").unwrap();
//! let package = std::fs::read("extension.vsix").unwrap();
//! let signature = SignatureArtifact::load("extension.sigzip").unwrap();
//!
//! assert!(verify_signature(&package, &key, &signature).unwrap());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod hash;
pub mod key_cache;
pub mod keys;
pub mod signature;
pub mod signer;
pub mod telemetry;
pub mod verifier;

// Re-export main types for convenience
pub use config::{Config, DEFAULT_PUBLIC_KEY_URL};
pub use error::{Result, SignError};
pub use hash::{hash_bytes, Digest};
pub use key_cache::{download_public_key, PublicKeyCache};
pub use keys::{load_private_key, load_public_key, PrivateKey, PublicKey};
pub use signature::{SignatureArtifact, DEFAULT_SIGNATURE_FILE};
pub use signer::{sign_file, Signer};
pub use verifier::{verify_package, verify_signature, Verifier, VerifyOutcome, VerifyRequest};
