//! Immutable run configuration.
//!
//! All inputs for one backup run are collected into a single [`RunConfig`]
//! before anything executes. [`RunConfig::validate`] is the pre-flight gate:
//! it touches nothing but `stat` and reports the first invalid input as a
//! `Validation` error, so a misconfigured run has no side effects.

use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::core::upload::UploadTarget;
use crate::error::{DuffelError, Result};

/// Everything a single run needs, validated once and passed explicitly into
/// each stage.
pub struct RunConfig {
    /// Folder whose regular files get archived.
    pub folder: PathBuf,
    /// Armored public key material; every key becomes an encryption recipient.
    pub trusted_public_key: PathBuf,
    /// Armored private key material holding the signing key.
    pub server_private_key: PathBuf,
    /// Full hex fingerprint selecting the signing key within the private blob.
    pub signer_fingerprint: String,
    /// Passphrase unlocking the signing key.
    pub signing_passphrase: Zeroizing<String>,
    /// Destination bucket.
    pub bucket: String,
    /// Object key the artifact is stored under.
    pub object_key: String,
    /// AWS region of the bucket.
    pub region: String,
    /// Explicit AWS access key id.
    pub access_key: String,
    /// Explicit AWS secret access key.
    pub secret_key: Zeroizing<String>,
}

impl RunConfig {
    /// Pre-flight validation, run before any stage executes.
    pub fn validate(&self) -> Result<()> {
        if !is_dir(&self.folder) {
            return Err(invalid("folder path is missing or not a directory"));
        }
        if !is_file(&self.trusted_public_key) {
            return Err(invalid("trusted public key file does not exist"));
        }
        if !is_file(&self.server_private_key) {
            return Err(invalid("server private key file does not exist"));
        }
        if self.signing_passphrase.is_empty() {
            return Err(invalid("signing passphrase must not be empty"));
        }
        if self.signer_fingerprint.trim().is_empty() {
            return Err(invalid("signer fingerprint must not be empty"));
        }
        if self.bucket.is_empty() || self.object_key.is_empty() {
            return Err(invalid("bucket name and object key must not be empty"));
        }
        if self.region.is_empty() {
            return Err(invalid("AWS region must not be empty"));
        }
        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(invalid("AWS access key and secret key must not be empty"));
        }
        Ok(())
    }

    /// Destination coordinates for the upload stage.
    pub fn upload_target(&self) -> UploadTarget {
        UploadTarget {
            bucket: self.bucket.clone(),
            object_key: self.object_key.clone(),
            region: self.region.clone(),
            access_key: self.access_key.clone(),
            secret_key: Zeroizing::new(self.secret_key.to_string()),
        }
    }
}

fn invalid(msg: &str) -> DuffelError {
    DuffelError::Validation(msg.to_string())
}

fn is_dir(path: &Path) -> bool {
    path.is_dir()
}

fn is_file(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn valid_config(tmp: &TempDir) -> RunConfig {
        let folder = tmp.path().join("data");
        let pubkey = tmp.path().join("trusted.asc");
        let privkey = tmp.path().join("server.asc");
        fs::create_dir_all(&folder).unwrap();
        fs::write(&pubkey, "placeholder").unwrap();
        fs::write(&privkey, "placeholder").unwrap();

        RunConfig {
            folder,
            trusted_public_key: pubkey,
            server_private_key: privkey,
            signer_fingerprint: "ab".repeat(20),
            signing_passphrase: Zeroizing::new("pw1".into()),
            bucket: "backups".into(),
            object_key: "site.tar.gz.pgp".into(),
            region: "eu-west-1".into(),
            access_key: "AKIAEXAMPLE".into(),
            secret_key: Zeroizing::new("secret".into()),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let tmp = TempDir::new().unwrap();
        assert!(valid_config(&tmp).validate().is_ok());
    }

    #[test]
    fn test_missing_folder_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut config = valid_config(&tmp);
        config.folder = tmp.path().join("nope");

        let err = config.validate().unwrap_err();
        assert!(matches!(err, DuffelError::Validation(_)));
        assert!(err.to_string().contains("folder"));
    }

    #[test]
    fn test_file_as_folder_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut config = valid_config(&tmp);
        // Point the folder at a regular file
        config.folder = config.trusted_public_key.clone();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_key_files_rejected() {
        let tmp = TempDir::new().unwrap();

        let mut config = valid_config(&tmp);
        config.trusted_public_key = tmp.path().join("missing.asc");
        assert!(config.validate().is_err());

        let mut config = valid_config(&tmp);
        config.server_private_key = tmp.path().join("missing.asc");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_strings_rejected() {
        let tmp = TempDir::new().unwrap();

        for field in ["passphrase", "fingerprint", "bucket", "region", "secret"] {
            let mut config = valid_config(&tmp);
            match field {
                "passphrase" => config.signing_passphrase = Zeroizing::new(String::new()),
                "fingerprint" => config.signer_fingerprint = "  ".into(),
                "bucket" => config.bucket = String::new(),
                "region" => config.region = String::new(),
                _ => config.secret_key = Zeroizing::new(String::new()),
            }
            assert!(config.validate().is_err(), "{field} should be rejected");
        }
    }

    #[test]
    fn test_upload_target_mirrors_config() {
        let tmp = TempDir::new().unwrap();
        let config = valid_config(&tmp);
        let target = config.upload_target();

        assert_eq!(target.bucket, "backups");
        assert_eq!(target.object_key, "site.tar.gz.pgp");
        assert_eq!(target.region, "eu-west-1");
    }
}
