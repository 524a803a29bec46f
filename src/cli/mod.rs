//! Command-line interface.

pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::core::config::RunConfig;
use crate::core::pipeline;
use crate::error::Result;

/// Duffel - pack a folder, sign and encrypt it, ship it to S3.
#[derive(Parser)]
#[command(
    name = "duffel",
    about = "Pack a folder, sign and encrypt it with OpenPGP, ship it to S3",
    version,
    after_help = "Pack tight. Ship sealed."
)]
pub struct Cli {
    /// Path to the folder to back up
    #[arg(long, value_name = "PATH")]
    pub folder: String,

    /// Path to the armored trusted public key(s) used as encryption recipients
    #[arg(long, value_name = "PATH")]
    pub trusted_public_key: String,

    /// Path to the armored private key material holding the signing key
    #[arg(long, value_name = "PATH")]
    pub server_private_key: String,

    /// Hex fingerprint of the signing key within the private key material
    #[arg(long, value_name = "FINGERPRINT")]
    pub signer_fingerprint: String,

    /// Passphrase protecting the signing key
    #[arg(
        long,
        value_name = "PASSPHRASE",
        env = "DUFFEL_SIGNING_PASSPHRASE",
        hide_env_values = true
    )]
    pub signing_passphrase: String,

    /// Destination S3 bucket name
    #[arg(long, value_name = "BUCKET")]
    pub bucket: String,

    /// Object key to store the artifact under
    #[arg(long, value_name = "KEY")]
    pub object_key: String,

    /// AWS region of the destination bucket
    #[arg(long, value_name = "REGION")]
    pub region: String,

    /// AWS access key id
    #[arg(long, value_name = "ACCESS_KEY")]
    pub access_key: String,

    /// AWS secret access key
    #[arg(
        long,
        value_name = "SECRET_KEY",
        env = "DUFFEL_AWS_SECRET_KEY",
        hide_env_values = true
    )]
    pub secret_key: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the backup pipeline for the parsed arguments.
pub fn execute(cli: Cli) -> Result<()> {
    let config = RunConfig {
        folder: PathBuf::from(cli.folder),
        trusted_public_key: PathBuf::from(cli.trusted_public_key),
        server_private_key: PathBuf::from(cli.server_private_key),
        signer_fingerprint: cli.signer_fingerprint,
        signing_passphrase: Zeroizing::new(cli.signing_passphrase),
        bucket: cli.bucket,
        object_key: cli.object_key,
        region: cli.region,
        access_key: cli.access_key,
        secret_key: Zeroizing::new(cli.secret_key),
    };
    let receipt = pipeline::run(&config)?;

    output::success(&format!(
        "uploaded {} bytes to {}/{}",
        receipt.ciphertext_len, receipt.bucket, receipt.object_key
    ));
    Ok(())
}
