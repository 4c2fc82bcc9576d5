//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the repository traits
//! that stores all data in BTreeMaps wrapped in `Arc<RwLock<_>>`. It mirrors
//! the DynamoDB semantics the rest of the crate relies on (page limits,
//! upserts, idempotent deletes, missing-table errors) without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use accountstore::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new("Accounts");
//! repo.create_table().await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
