//! # projid common library
//!
//! Shared code for the project identifier resolver:
//! - The `ProjectId` token type
//! - Error types
//! - Resolver configuration loading
//! - Persistent key-value store port and its implementations

pub mod config;
pub mod error;
pub mod project_id;
pub mod store;

pub use config::ResolverConfig;
pub use error::{Error, Result};
pub use project_id::ProjectId;
pub use store::{KeyValueStore, MemoryStore, TomlFileStore};
