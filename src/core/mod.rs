//! Core pipeline components.
//!
//! Each stage of the backup pipeline lives in its own module and hands its
//! output to the next stage by value; no stage reads ambient configuration.

pub mod archive;
pub mod config;
pub mod crypto;
pub mod keyring;
pub mod pipeline;
pub mod upload;
