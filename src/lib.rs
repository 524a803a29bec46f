//! Duffel - encrypt-then-backup for a single folder.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── mod           # Argument definitions and dispatch
//! │   └── output        # Styled terminal output helpers
//! └── core/             # Pipeline components
//!     ├── config        # Immutable run configuration + pre-flight checks
//!     ├── archive       # Deterministic tar.gz packing of a folder tree
//!     ├── keyring       # Armored OpenPGP key loading and signer unlock
//!     ├── crypto        # Sign-then-encrypt into a single artifact
//!     ├── upload        # One-shot S3 put with explicit credentials
//!     └── pipeline      # Sequential stage driver
//! ```
//!
//! The pipeline is strictly linear: folder -> archive bytes -> ciphertext
//! bytes -> stored object. Each stage completes before the next begins and
//! the first failure aborts the run. Both the archive and the ciphertext are
//! held fully in memory, which caps folder size at available RAM; that is a
//! deliberate simplification for small backup sets, not an oversight.

pub mod cli;
pub mod core;
pub mod error;
