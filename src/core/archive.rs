//! Deterministic tar.gz packing of a folder tree.
//!
//! The archive is modelled as an ordered list of `(relative path, bytes)`
//! entries before any container bytes exist, so the entry set can be
//! inspected independently of the tar encoding. Serialization normalizes
//! all header metadata, which makes re-archiving an unchanged tree
//! byte-identical.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tar::{Builder as TarBuilder, Header};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// One regular file captured from the source tree.
#[derive(Debug)]
pub struct ArchiveEntry {
    /// Path relative to the archive root. Never absolute, never contains
    /// a parent-directory segment (guaranteed by `strip_prefix`).
    pub relative_path: PathBuf,
    /// Full file contents.
    pub data: Vec<u8>,
}

/// An ordered, in-memory archive of a folder's regular files.
#[derive(Debug)]
pub struct Archive {
    entries: Vec<ArchiveEntry>,
}

impl Archive {
    /// Walk `root` and capture every regular file beneath it.
    ///
    /// Traversal is lexicographic per directory level, recursing into
    /// subdirectories, so repeated packs of an unchanged tree produce the
    /// same entry order. Symlinks are not followed and, like devices,
    /// sockets and fifos, produce no entry. Directories carry no entry of
    /// their own. Any file that becomes unreadable mid-walk aborts the
    /// whole pack; no partial archive is returned.
    ///
    /// An empty tree yields a valid zero-entry archive.
    pub fn pack(root: &Path) -> Result<Self> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let msg = e.to_string();
                e.into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, msg))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?
                .to_path_buf();

            let data = fs::read(entry.path())?;
            debug!(
                path = %relative_path.display(),
                bytes = data.len(),
                "captured file"
            );

            entries.push(ArchiveEntry {
                relative_path,
                data,
            });
        }

        debug!(entries = entries.len(), "folder packed");
        Ok(Self { entries })
    }

    /// The captured entries, in archive order.
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to a finalized tar.gz byte buffer.
    ///
    /// Header metadata is fixed (mode 0644, mtime 0, uid/gid 0) so the
    /// container bytes depend only on entry paths, order and contents. The
    /// tar trailer and the gzip stream are both flushed before the buffer
    /// is returned; a partially written container is never exposed.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = TarBuilder::new(encoder);

        for entry in &self.entries {
            let mut header = Header::new_gnu();
            header.set_size(entry.data.len() as u64);
            header.set_mode(0o644);
            header.set_mtime(0);
            header.set_uid(0);
            header.set_gid(0);
            builder.append_data(&mut header, &entry.relative_path, entry.data.as_slice())?;
        }

        let encoder = builder.into_inner()?;
        let bytes = encoder.finish()?;
        Ok(bytes)
    }
}
