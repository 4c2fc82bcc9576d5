//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the repository traits
//! using `aws-sdk-dynamodb`.

mod client;
mod conversions;
mod error;
mod repository;
mod tables;

pub use client::{create_client, validate_config};
pub use repository::DynamoDbRepository;
