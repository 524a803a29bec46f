//! One-shot S3 upload with explicit credentials.
//!
//! The client is built from exactly the region and key pair in the
//! [`UploadTarget`] — no credential-chain fallback, no environment
//! inference. One `put_object` call persists the whole artifact; overwrite
//! semantics at the destination key are S3's (last write wins).

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{DuffelError, Result};

/// Destination coordinates and credentials for one upload.
pub struct UploadTarget {
    pub bucket: String,
    pub object_key: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: Zeroizing<String>,
}

impl std::fmt::Debug for UploadTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadTarget")
            .field("bucket", &self.bucket)
            .field("object_key", &self.object_key)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

/// Persist the artifact bytes as a single object at `bucket/object_key`.
///
/// Any authentication rejection, missing bucket, quota violation or network
/// failure surfaces as a `Transport` error. No multipart, no retry.
pub fn upload(artifact: Vec<u8>, target: &UploadTarget) -> Result<()> {
    debug!(
        bucket = %target.bucket,
        key = %target.object_key,
        bytes = artifact.len(),
        "uploading artifact"
    );

    // Create a tokio runtime for the async AWS SDK
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| DuffelError::Transport(format!("failed to create runtime: {e}")))?;

    rt.block_on(async {
        let credentials = Credentials::new(
            target.access_key.clone(),
            target.secret_key.to_string(),
            None,
            None,
            "duffel-run-config",
        );

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(target.region.clone()))
            .credentials_provider(credentials)
            .build();
        let client = Client::from_conf(config);

        client
            .put_object()
            .bucket(&target.bucket)
            .key(&target.object_key)
            .body(ByteStream::from(artifact))
            .send()
            .await
            .map_err(|e| {
                DuffelError::Transport(format!(
                    "put object failed: {}",
                    aws_sdk_s3::error::DisplayErrorContext(&e)
                ))
            })?;

        debug!(bucket = %target.bucket, key = %target.object_key, "upload acknowledged");
        Ok(())
    })
}
