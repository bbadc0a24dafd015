//! zettel library
//!
//! File-backed Zettelkasten store: atomic Markdown notes linked through
//! YAML tag files, with an in-memory alias-aware tag index.
//!
//! # Modules
//!
//! - `core`: notes, tags, the tag index, store paths
//! - `config`: typed configuration
//! - `error`: crate-wide error type

pub mod config;
pub mod core;
pub mod error;

// Re-exports for convenience
pub use config::Config;
pub use core::index::TagIndex;
pub use core::meta::Meta;
pub use core::note::{collect_notes, Note};
pub use core::paths::DataPaths;
pub use core::tag::{normalize_name, Tag};
pub use error::{VaultError, VaultResult};
