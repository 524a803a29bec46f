//! Shared fixtures for integration tests: generated OpenPGP key material
//! and a small sample folder tree.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use pgp::composed::{KeyType, SecretKeyParamsBuilder, SignedPublicKey, SignedSecretKey};
use pgp::types::SecretKeyTrait;
use pgp::ArmorOptions;
use rand::rngs::StdRng;
use rand::SeedableRng;

use duffel::core::keyring::hex_fingerprint;

/// A freshly generated RSA key pair, armored both ways.
pub struct TestKey {
    pub secret: SignedSecretKey,
    pub public: SignedPublicKey,
    pub secret_armored: String,
    pub public_armored: String,
    pub fingerprint: String,
}

/// Generate a signing+encryption capable RSA-2048 key.
///
/// Pass an empty `passphrase` for an unprotected key.
pub fn generate_key(user_id: &str, passphrase: &str) -> TestKey {
    let mut rng = StdRng::from_entropy();

    let mut builder = SecretKeyParamsBuilder::default();
    builder
        .key_type(KeyType::Rsa(2048))
        .can_certify(true)
        .can_sign(true)
        .can_encrypt(true)
        .primary_user_id(user_id.into());
    if !passphrase.is_empty() {
        builder.passphrase(Some(passphrase.into()));
    }
    let params = builder.build().unwrap();

    let pw = || passphrase.to_string();
    let secret = params.generate(&mut rng).unwrap().sign(&mut rng, pw).unwrap();
    let public = secret
        .public_key()
        .sign(&mut rng, &secret, pw)
        .unwrap();

    let secret_armored = secret.to_armored_string(ArmorOptions::default()).unwrap();
    let public_armored = public.to_armored_string(ArmorOptions::default()).unwrap();
    let fingerprint = hex_fingerprint(&secret);

    TestKey {
        secret,
        public,
        secret_armored,
        public_armored,
        fingerprint,
    }
}

/// Write armored key material to `dir/name` and return the path.
pub fn write_key_file(dir: &Path, name: &str, armored: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, armored).unwrap();
    path
}

/// Create the sample tree used across tests: `a.txt` = "hello",
/// `sub/b.txt` = "world".
pub fn sample_folder(dir: &Path) -> PathBuf {
    let folder = dir.join("data");
    fs::create_dir_all(folder.join("sub")).unwrap();
    fs::write(folder.join("a.txt"), "hello").unwrap();
    fs::write(folder.join("sub/b.txt"), "world").unwrap();
    folder
}
