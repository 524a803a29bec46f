//! Armored OpenPGP key material loading.
//!
//! Two separate blobs feed one run: the trusted public blob, whose keys all
//! become encryption recipients, and the server private blob, from which the
//! signing key is selected by its full hex fingerprint. The passphrase is
//! checked against the selected key at load time, so a bad passphrase fails
//! the run before any encryption or upload work starts.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use pgp::composed::{Deserializable, SignedPublicKey, SignedSecretKey};
use pgp::types::{PublicKeyTrait, SecretKeyTrait};
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{DuffelError, Result};

/// Recipients plus one unlocked signer, ready for sealing.
///
/// Construction guarantees the invariants the crypto stage relies on: at
/// least one recipient, and a signer whose private material the passphrase
/// actually unlocks.
pub struct KeyRing {
    recipients: Vec<SignedPublicKey>,
    signer: SignedSecretKey,
    passphrase: Zeroizing<String>,
}

impl KeyRing {
    /// Parse both armored blobs and unlock the signing key.
    ///
    /// Key files are read whole; no handle outlives this call. The signer is
    /// the private-blob key whose hex fingerprint equals
    /// `signer_fingerprint` (case-insensitive, spaces ignored); there is no
    /// positional fallback.
    pub fn load(
        public_path: &Path,
        private_path: &Path,
        signer_fingerprint: &str,
        passphrase: &str,
    ) -> Result<Self> {
        let recipients = read_recipients(public_path)?;
        debug!(recipients = recipients.len(), "trusted public keys loaded");

        let candidates = read_signer_candidates(private_path)?;
        debug!(candidates = candidates.len(), "private keys loaded");

        let wanted = normalize_fingerprint(signer_fingerprint);
        let signer = candidates
            .into_iter()
            .find(|key| hex_fingerprint(key) == wanted)
            .ok_or_else(|| {
                DuffelError::Authentication(format!(
                    "no usable signer identity with fingerprint {wanted}"
                ))
            })?;

        // Prove the passphrase before anything downstream depends on it.
        signer
            .unlock(|| passphrase.to_string(), |_| Ok(()))
            .map_err(|e| {
                DuffelError::Authentication(format!("signing key unlock failed: {e}"))
            })?;
        debug!(fingerprint = %wanted, "signing key unlocked");

        Ok(Self {
            recipients,
            signer,
            passphrase: Zeroizing::new(passphrase.to_string()),
        })
    }

    /// Public keys the artifact is encrypted to.
    pub fn recipients(&self) -> &[SignedPublicKey] {
        &self.recipients
    }

    /// The selected signing key.
    pub fn signer(&self) -> &SignedSecretKey {
        &self.signer
    }

    /// Passphrase for the signing key, re-supplied at signature time.
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }
}

impl std::fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRing")
            .field("recipients", &self.recipients.len())
            .field("signer", &hex_fingerprint(&self.signer))
            .finish_non_exhaustive()
    }
}

fn read_recipients(path: &Path) -> Result<Vec<SignedPublicKey>> {
    let armored = fs::read_to_string(path)?;

    let (keys, _headers) =
        SignedPublicKey::from_armor_many(Cursor::new(armored)).map_err(|e| {
            DuffelError::Format(format!("trusted public key material unparsable: {e}"))
        })?;

    let recipients: Vec<SignedPublicKey> = keys
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| DuffelError::Format(format!("trusted public key material invalid: {e}")))?;

    if recipients.is_empty() {
        return Err(DuffelError::Format(
            "trusted public key material holds no keys".to_string(),
        ));
    }
    Ok(recipients)
}

fn read_signer_candidates(path: &Path) -> Result<Vec<SignedSecretKey>> {
    let armored = fs::read_to_string(path)?;

    let (keys, _headers) =
        SignedSecretKey::from_armor_many(Cursor::new(armored)).map_err(|e| {
            DuffelError::Format(format!("server private key material unparsable: {e}"))
        })?;

    let candidates: Vec<SignedSecretKey> = keys
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| DuffelError::Format(format!("server private key material invalid: {e}")))?;

    if candidates.is_empty() {
        return Err(DuffelError::Format(
            "server private key material holds no keys".to_string(),
        ));
    }
    Ok(candidates)
}

/// Lowercased hex of a key's full fingerprint.
pub fn hex_fingerprint(key: &impl PublicKeyTrait) -> String {
    key.fingerprint()
        .as_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn normalize_fingerprint(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
}
