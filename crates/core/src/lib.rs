//! Core types and storage traits for accountstore.
//!
//! Everything in this crate is backend-agnostic: the `Account` entity, the
//! table schema constants, and the repository traits implemented by the
//! storage backends in the `accountstore` crate.

pub mod account;
pub mod storage;
