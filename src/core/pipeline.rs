//! Sequential pipeline driver.
//!
//! One run walks `Validating -> Archiving -> KeyLoading -> Encrypting ->
//! Uploading -> Done`, strictly forward, single-threaded. The first error
//! moves the run to the terminal `Failed` state: no later stage executes,
//! nothing is retried, and no partial artifact is uploaded or kept.

use tracing::{debug, error};

use crate::core::archive::Archive;
use crate::core::config::RunConfig;
use crate::core::crypto;
use crate::core::keyring::KeyRing;
use crate::core::upload;
use crate::error::Result;

/// Pipeline states. Transitions only move right, except the jump to
/// `Failed`, which is reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Archiving,
    KeyLoading,
    Encrypting,
    Uploading,
    Done,
    Failed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::Archiving => "archiving",
            Stage::KeyLoading => "key-loading",
            Stage::Encrypting => "encrypting",
            Stage::Uploading => "uploading",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What a successful run reports back to the operator.
#[derive(Debug)]
pub struct Receipt {
    pub bucket: String,
    pub object_key: String,
    pub ciphertext_len: usize,
}

/// Execute one full backup run.
pub fn run(config: &RunConfig) -> Result<Receipt> {
    let mut stage = Stage::Validating;
    debug!(stage = %stage, "run started");

    match stages(config, &mut stage) {
        Ok(receipt) => {
            debug!(stage = %stage, "run complete");
            Ok(receipt)
        }
        Err(e) => {
            error!(failed_at = %stage, error = %e, "run aborted");
            stage = Stage::Failed;
            debug!(stage = %stage, "terminal state");
            Err(e)
        }
    }
}

fn stages(config: &RunConfig, stage: &mut Stage) -> Result<Receipt> {
    config.validate()?;

    advance(stage, Stage::Archiving);
    let archive = Archive::pack(&config.folder)?;
    debug!(entries = archive.len(), "archive packed");
    let archive_bytes = archive.to_bytes()?;

    advance(stage, Stage::KeyLoading);
    let keyring = KeyRing::load(
        &config.trusted_public_key,
        &config.server_private_key,
        &config.signer_fingerprint,
        &config.signing_passphrase,
    )?;

    advance(stage, Stage::Encrypting);
    let artifact = crypto::seal(&archive_bytes, &keyring)?;
    let ciphertext_len = artifact.len();

    advance(stage, Stage::Uploading);
    upload::upload(artifact.into_bytes(), &config.upload_target())?;

    advance(stage, Stage::Done);
    Ok(Receipt {
        bucket: config.bucket.clone(),
        object_key: config.object_key.clone(),
        ciphertext_len,
    })
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = %stage, to = %next, "stage transition");
    *stage = next;
}
