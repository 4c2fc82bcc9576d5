//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB items and [`Account`].
//! A row carries the partition key plus the whole account nested under
//! `Data.object`:
//!
//! ```text
//! AccountName: S
//! Data:        M { object: M { name: S, key: S, description: S } }
//! ```

use std::collections::HashMap;

use accountstore_core::account::{Account, ACCOUNT_NAME_ATTRIBUTE, DATA_ATTRIBUTE, DATA_OBJECT_KEY};
use accountstore_core::storage::RepositoryError;
use aws_sdk_dynamodb::types::AttributeValue;

const FIELD_NAME: &str = "name";
const FIELD_KEY: &str = "key";
const FIELD_DESCRIPTION: &str = "description";

/// Encode an Account as a map attribute.
pub fn account_to_attribute(account: &Account) -> AttributeValue {
    AttributeValue::M(HashMap::from([
        (
            FIELD_NAME.to_string(),
            AttributeValue::S(account.name.clone()),
        ),
        (FIELD_KEY.to_string(), AttributeValue::S(account.key.clone())),
        (
            FIELD_DESCRIPTION.to_string(),
            AttributeValue::S(account.description.clone()),
        ),
    ]))
}

/// Decode a map attribute into an Account.
pub fn attribute_to_account(value: &AttributeValue) -> Result<Account, RepositoryError> {
    let fields = value.as_m().map_err(|_| {
        RepositoryError::Serialization("Account payload is not a map".to_string())
    })?;

    Ok(Account {
        name: get_string(fields, FIELD_NAME)?,
        key: get_string(fields, FIELD_KEY)?,
        description: get_string(fields, FIELD_DESCRIPTION)?,
    })
}

/// Convert an Account to a DynamoDB item.
pub fn account_to_item(account: &Account) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert(
        ACCOUNT_NAME_ATTRIBUTE.to_string(),
        AttributeValue::S(account.name.clone()),
    );
    item.insert(
        DATA_ATTRIBUTE.to_string(),
        AttributeValue::M(HashMap::from([(
            DATA_OBJECT_KEY.to_string(),
            account_to_attribute(account),
        )])),
    );

    item
}

/// Convert a DynamoDB item to an Account.
pub fn item_to_account(item: &HashMap<String, AttributeValue>) -> Result<Account, RepositoryError> {
    let payload = item
        .get(DATA_ATTRIBUTE)
        .and_then(|data| data.as_m().ok())
        .and_then(|data| data.get(DATA_OBJECT_KEY))
        .ok_or_else(|| {
            RepositoryError::InvalidData(format!(
                "Missing or invalid field: {}.{}",
                DATA_ATTRIBUTE, DATA_OBJECT_KEY
            ))
        })?;

    attribute_to_account(payload)
}

/// Get a required string attribute.
fn get_string(
    fields: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    fields
        .get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::Serialization(format!("Missing or invalid field: {}", key)))
}
