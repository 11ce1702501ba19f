//! Command-line interface.
//!
//! Two subcommands, `sign` and `verify`. This is the only layer that turns
//! errors into process exit codes.

use crate::config::{Config, DEFAULT_PUBLIC_KEY_URL};
use crate::keys::load_private_key;
use crate::signature::DEFAULT_SIGNATURE_FILE;
use crate::signer::sign_file;
use crate::verifier::{verify_package, VerifyOutcome, VerifyRequest, EXIT_FAILURE};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Sign and verify extension packages.
#[derive(Parser, Debug)]
#[command(name = "ovsx-sign")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// URL of the public key used when `verify` is given no key file
    #[arg(
        long,
        global = true,
        value_name = "URL",
        env = "OVSX_SIGN_PUBLIC_KEY_URL",
        default_value = DEFAULT_PUBLIC_KEY_URL
    )]
    pub public_key_url: String,

    /// Directory for downloaded public keys
    #[arg(long, global = true, value_name = "DIR", env = "OVSX_SIGN_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Public key download timeout in seconds
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        env = "OVSX_SIGN_TIMEOUT",
        default_value_t = 30
    )]
    pub timeout: u64,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign an extension package with a private key
    Sign {
        /// The extension package to sign
        #[arg(value_name = "EXTENSION_PACKAGE")]
        package: PathBuf,

        /// PEM private key file
        #[arg(value_name = "PRIVATE_KEY")]
        private_key: PathBuf,

        /// Where to write the signature (default: ./extension.sigzip)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Verify an extension package against a signature archive
    Verify {
        /// The extension package to verify
        #[arg(value_name = "EXTENSION_PACKAGE")]
        package: PathBuf,

        /// The signature archive produced by `sign`
        #[arg(value_name = "SIGNATURE_ARCHIVE")]
        signature: PathBuf,

        /// PEM public key file (default: downloaded from --public-key-url)
        #[arg(short, long = "public-key", value_name = "PATH")]
        public_key: Option<PathBuf>,
    },
}

impl Cli {
    /// Build the runtime configuration from the global flags.
    pub fn config(&self) -> Config {
        let mut config = Config::default()
            .with_public_key_url(self.public_key_url.clone())
            .with_timeout(Duration::from_secs(self.timeout));
        if let Some(dir) = &self.cache_dir {
            config = config.with_cache_dir(dir);
        }
        config
    }
}

/// Run the parsed command and return the process exit code.
pub fn run(cli: Cli) -> u8 {
    let config = cli.config();
    match cli.command {
        Command::Sign {
            package,
            private_key,
            output,
        } => match run_sign(&package, &private_key, output.as_deref()) {
            Ok(path) => {
                println!("Signature file created at {}", path.display());
                0
            }
            Err(e) => {
                eprintln!("Error: {:#}", e);
                EXIT_FAILURE
            }
        },
        Command::Verify {
            package,
            signature,
            public_key,
        } => {
            let request = VerifyRequest {
                package,
                signature,
                public_key,
            };
            let outcome = verify_package(&request, &config);
            report(&outcome);
            outcome.exit_code()
        }
    }
}

/// Output path for `sign`: the given path, or `extension.sigzip` in the
/// working directory.
pub fn output_path(output: Option<&Path>) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SIGNATURE_FILE))
}

/// The `sign` flow: read the package, load the key, sign, write the artifact.
pub fn run_sign(package: &Path, private_key: &Path, output: Option<&Path>) -> anyhow::Result<PathBuf> {
    let package_bytes = std::fs::read(package)
        .with_context(|| format!("failed to read extension package {}", package.display()))?;
    let key = load_private_key(private_key)
        .with_context(|| format!("failed to read private key {}", private_key.display()))?;

    let artifact = sign_file(&package_bytes, &key)?;

    let path = output_path(output);
    artifact
        .save(&path)
        .with_context(|| format!("failed to write signature to {}", path.display()))?;

    tracing::info!(package = %package.display(), output = %path.display(), "signed extension package");
    Ok(path)
}

fn report(outcome: &VerifyOutcome) {
    match outcome {
        VerifyOutcome::Valid => println!("Signature is valid"),
        VerifyOutcome::InvalidSignature => println!("Signature is not valid"),
        VerifyOutcome::PackageNotFound(path) => {
            println!("Extension package not found: {}", path.display())
        }
        VerifyOutcome::SignatureNotFound(path) => {
            println!("Signature archive not found: {}", path.display())
        }
        VerifyOutcome::Infrastructure(e) => eprintln!("Error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::test_support;
    use crate::signature::SignatureArtifact;
    use crate::verifier::verify_signature;

    #[test]
    fn test_parse_sign_defaults() {
        let cli = Cli::try_parse_from(["ovsx-sign", "sign", "ext.vsix", "private.pem"]).unwrap();
        match cli.command {
            Command::Sign {
                package,
                private_key,
                output,
            } => {
                assert_eq!(package, PathBuf::from("ext.vsix"));
                assert_eq!(private_key, PathBuf::from("private.pem"));
                assert_eq!(output_path(output.as_deref()), PathBuf::from("extension.sigzip"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_verify_short_flags() {
        let cli = Cli::try_parse_from([
            "ovsx-sign",
            "verify",
            "ext.vsix",
            "ext.sigzip",
            "-p",
            "public.pem",
            "--timeout",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.config().timeout, Duration::from_secs(5));
        match cli.command {
            Command::Verify { public_key, .. } => {
                assert_eq!(public_key, Some(PathBuf::from("public.pem")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_sign_output_flag() {
        let cli =
            Cli::try_parse_from(["ovsx-sign", "sign", "a", "b", "-o", "out/custom.sig"]).unwrap();
        match cli.command {
            Command::Sign { output, .. } => {
                assert_eq!(output_path(output.as_deref()), PathBuf::from("out/custom.sig"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_missing_arguments_rejected() {
        assert!(Cli::try_parse_from(["ovsx-sign", "sign", "only-package"]).is_err());
        assert!(Cli::try_parse_from(["ovsx-sign", "verify"]).is_err());
    }

    #[test]
    fn test_run_sign_writes_exactly_the_output() {
        let (private_key, public_key) = test_support::keypair();
        let dir = tempfile::tempdir().unwrap();
        let package = dir.path().join("ext.vsix");
        let key_path = dir.path().join("private.pem");
        let output = dir.path().join("sig.bin");
        std::fs::write(&package, b"package").unwrap();
        std::fs::write(&key_path, private_key.as_pem()).unwrap();

        let written = run_sign(&package, &key_path, Some(&output)).unwrap();

        assert_eq!(written, output);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
        let artifact = SignatureArtifact::load(&output).unwrap();
        assert!(verify_signature(b"package", &public_key, &artifact).unwrap());
    }

    #[test]
    fn test_run_sign_missing_package() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sig.bin");
        let result = run_sign(
            &dir.path().join("missing.vsix"),
            &dir.path().join("private.pem"),
            Some(&output),
        );

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
