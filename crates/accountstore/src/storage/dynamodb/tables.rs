//! Accounts table provisioning.

use std::time::Duration;

use accountstore_core::account::{ACCOUNT_NAME_ATTRIBUTE, READ_CAPACITY_UNITS, WRITE_CAPACITY_UNITS};
use accountstore_core::storage::{RepositoryError, Result};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
    TableStatus,
};
use aws_sdk_dynamodb::Client;

use super::error::{map_create_table_error, map_describe_table_error};

/// How long to wait for a new table to become active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for ActivationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            delay: Duration::from_secs(2),
        }
    }
}

/// Creates the accounts table: one string hash key, 10/10 provisioned capacity.
pub async fn create_accounts_table(client: &Client, table_name: &str) -> Result<()> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name(ACCOUNT_NAME_ATTRIBUTE)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

    let attribute_definition = AttributeDefinition::builder()
        .attribute_name(ACCOUNT_NAME_ATTRIBUTE)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

    let throughput = ProvisionedThroughput::builder()
        .read_capacity_units(READ_CAPACITY_UNITS)
        .write_capacity_units(WRITE_CAPACITY_UNITS)
        .build()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

    client
        .create_table()
        .table_name(table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute_definition)
        .provisioned_throughput(throughput)
        .send()
        .await
        .map_err(|e| map_create_table_error(e, table_name))?;

    tracing::info!(table = table_name, "created table");
    Ok(())
}

/// Fetches the table status, returns None if the table doesn't exist.
pub async fn get_table_status(client: &Client, table_name: &str) -> Result<Option<TableStatus>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => Ok(response
            .table()
            .and_then(|table| table.table_status())
            .cloned()),
        Err(err) => match map_describe_table_error(err, table_name) {
            RepositoryError::NotFound { .. } => Ok(None),
            err => Err(err),
        },
    }
}

/// Polls until the table reports `ACTIVE`.
pub async fn wait_for_table_active(
    client: &Client,
    table_name: &str,
    policy: ActivationPolicy,
) -> Result<()> {
    for attempt in 1..=policy.max_attempts {
        if let Some(TableStatus::Active) = get_table_status(client, table_name).await? {
            return Ok(());
        }
        tracing::debug!(table = table_name, attempt, "waiting for table to become active");
        tokio::time::sleep(policy.delay).await;
    }

    Err(RepositoryError::TableActivationTimeout {
        table_name: table_name.to_string(),
    })
}
