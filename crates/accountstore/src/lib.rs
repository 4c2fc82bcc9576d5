//! Account store client.
//!
//! Opens a DynamoDB connection (local emulator or remote service), provisions
//! the accounts table and stores, looks up, lists and deletes accounts.

pub mod config;
pub mod demo;
pub mod storage;

pub use config::{Config, Mode};
