//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `accountstore_core::storage`:
//!
//! - [`dynamodb`]: AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - [`inmemory`]: process-local backend used by the test suite

pub mod dynamodb;
pub mod inmemory;

pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;
