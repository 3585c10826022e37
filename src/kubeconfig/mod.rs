//! Kubeconfig module - The document merge engine.
//!
//! This module loads or creates a kubeconfig, upserts named cluster, user
//! and context entries into it, and writes it back.

mod document;
mod entry;
mod error;
mod file;
mod upsert;


pub use document::*;
pub use entry::*;
pub use error::*;
pub use file::*;
pub use upsert::*;
