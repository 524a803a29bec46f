//! Sign-then-encrypt sealing of archive bytes.
//!
//! The archive becomes one OpenPGP literal message, signed by the keyring's
//! signer and encrypted so that any single recipient key can decrypt it.
//! Suite selection stays at this one call site: SHA2-256 signature hash,
//! AES-256 session cipher, SEIPD v1 packets.

use pgp::composed::{Message, SignedPublicKey};
use pgp::crypto::hash::HashAlgorithm;
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::ser::Serialize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::core::keyring::KeyRing;
use crate::error::{DuffelError, Result};

/// The finished ciphertext. Only ever constructed whole: if signing or
/// encryption fails partway, no artifact exists.
pub struct SecureArtifact {
    bytes: Vec<u8>,
}

impl SecureArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hand the ciphertext to the upload stage by value.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Sign the archive bytes and encrypt the signed payload for every
/// recipient in the keyring.
///
/// The whole archive is written into the encrypting sink in one pass and
/// the message is fully serialized before returning, so the caller either
/// gets a complete artifact or an error.
pub fn seal(archive_bytes: &[u8], keyring: &KeyRing) -> Result<SecureArtifact> {
    if keyring.recipients().is_empty() {
        return Err(DuffelError::Format(
            "no encryption recipients available".to_string(),
        ));
    }

    let mut rng = StdRng::from_entropy();

    let message = Message::new_literal_bytes("duffel.tar.gz", archive_bytes);
    let signed = message
        .sign(
            &mut rng,
            keyring.signer(),
            || keyring.passphrase().to_string(),
            HashAlgorithm::SHA2_256,
        )
        .map_err(|e| DuffelError::Authentication(format!("signing failed: {e}")))?;

    let recipients: Vec<&SignedPublicKey> = keyring.recipients().iter().collect();
    let encrypted = signed
        .encrypt_to_keys_seipdv1(&mut rng, SymmetricKeyAlgorithm::AES256, &recipients)
        .map_err(|e| DuffelError::Format(format!("encryption failed: {e}")))?;

    let bytes = encrypted
        .to_bytes()
        .map_err(|e| DuffelError::Format(format!("message serialization failed: {e}")))?;

    debug!(
        plaintext = archive_bytes.len(),
        ciphertext = bytes.len(),
        recipients = recipients.len(),
        "archive sealed"
    );

    Ok(SecureArtifact { bytes })
}
