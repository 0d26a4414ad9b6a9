//! Carelog Storage Library
//!
//! Storage abstraction for uploaded files. The only backend in this
//! deployment is the local filesystem, serving files at a static URL
//! prefix; the trait keeps the record store and intake pipeline decoupled
//! from filesystem details.
//!
//! # Storage key format
//!
//! All keys use the layout `records/{filename}`. Keys must not contain
//! `..` or a leading `/`. Key generation is centralized in the `keys`
//! module.

pub mod keys;
pub mod local;
pub mod traits;

pub use keys::generate_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageBackend, StorageError, StorageResult};
