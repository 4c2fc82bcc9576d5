//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `accountstore_core::storage` using DynamoDB.

use accountstore_core::account::{
    table_exists, Account, ACCOUNT_NAME_ATTRIBUTE, LIST_TABLES_PAGE_SIZE, SCAN_PAGE_SIZE,
};
use accountstore_core::storage::{AccountRepository, RepositoryError, Result, TableCatalog};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::config::Config;

use super::client::create_client;
use super::conversions::{account_to_item, item_to_account};
use super::error::{
    map_delete_item_error, map_list_tables_error, map_put_item_error, map_query_error,
    map_scan_error,
};
use super::tables::{self, ActivationPolicy};

/// DynamoDB-based repository implementation.
///
/// Owns the SDK client for the lifetime of the value; dropping the repository
/// releases the connection.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    activation: ActivationPolicy,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            activation: ActivationPolicy::default(),
        }
    }

    /// Opens a connection for the configured mode.
    pub async fn open(config: &Config) -> Result<Self> {
        let client = create_client(config).await?;
        tracing::info!(
            endpoint = %config.target_display(),
            table = %config.table_name,
            "opened connection"
        );
        Ok(Self::new(client, config.table_name.clone()))
    }
}

#[async_trait]
impl TableCatalog for DynamoDbRepository {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let result = self
            .client
            .list_tables()
            .limit(LIST_TABLES_PAGE_SIZE)
            .send()
            .await
            .map_err(map_list_tables_error)?;

        let names = result.table_names.unwrap_or_default();
        tracing::debug!(tables = ?names, "listed tables");
        Ok(names)
    }

    async fn create_table(&self) -> Result<()> {
        tables::create_accounts_table(&self.client, &self.table_name).await
    }

    async fn ensure_table(&self) -> Result<bool> {
        if table_exists(&self.list_tables().await?, &self.table_name) {
            return Ok(false);
        }

        // The listing is a single page, so the table may exist beyond it.
        match self.create_table().await {
            Ok(()) => {}
            Err(RepositoryError::AlreadyExists { .. }) => return Ok(false),
            Err(err) => return Err(err),
        }

        tables::wait_for_table_active(&self.client, &self.table_name, self.activation).await?;
        Ok(true)
    }
}

#[async_trait]
impl AccountRepository for DynamoDbRepository {
    async fn put_account(&self, account: &Account) -> Result<()> {
        let item = account_to_item(account);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &self.table_name))?;

        tracing::debug!(account = %account.name, "put account");
        Ok(())
    }

    async fn find_account(&self, name: &str) -> Result<Option<Account>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(format!("{} = :nameValue", ACCOUNT_NAME_ATTRIBUTE))
            .expression_attribute_values(":nameValue", AttributeValue::S(name.to_string()))
            .consistent_read(true)
            .limit(1)
            .send()
            .await
            .map_err(|e| map_query_error(e, &self.table_name))?;

        // With Limit=1 a conforming backend returns at most one row.
        let items = result.items.unwrap_or_default();
        match items.as_slice() {
            [] => Ok(None),
            [item] => Ok(Some(item_to_account(item)?)),
            _ => Err(RepositoryError::InvalidData(format!(
                "{} rows share account name {}",
                items.len(),
                name
            ))),
        }
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .consistent_read(true)
            .limit(SCAN_PAGE_SIZE)
            .send()
            .await
            .map_err(|e| map_scan_error(e, &self.table_name))?;

        if result.last_evaluated_key.is_some() {
            tracing::debug!(
                limit = SCAN_PAGE_SIZE,
                "scan stopped at the page limit, remaining accounts not returned"
            );
        }

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_account).collect()
    }

    async fn delete_account(&self, name: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ACCOUNT_NAME_ATTRIBUTE, AttributeValue::S(name.to_string()))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, &self.table_name))?;

        tracing::debug!(account = name, "deleted account");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use aws_sdk_dynamodb::operation::create_table::{CreateTableError, CreateTableOutput};
    use aws_sdk_dynamodb::operation::delete_item::DeleteItemOutput;
    use aws_sdk_dynamodb::operation::describe_table::DescribeTableOutput;
    use aws_sdk_dynamodb::operation::list_tables::ListTablesOutput;
    use aws_sdk_dynamodb::operation::put_item::PutItemOutput;
    use aws_sdk_dynamodb::operation::query::QueryOutput;
    use aws_sdk_dynamodb::operation::scan::ScanOutput;
    use aws_sdk_dynamodb::types::error::ResourceInUseException;
    use aws_sdk_dynamodb::types::{KeyType, ScalarAttributeType, TableDescription, TableStatus};
    use aws_smithy_mocks::{mock, mock_client, RuleMode};

    use super::*;

    fn repo(client: Client) -> DynamoDbRepository {
        DynamoDbRepository::new(client, "Accounts")
    }

    fn foo() -> Account {
        Account::new("Foo", "123456", "My first account")
    }

    fn fum() -> Account {
        Account::new("Fum", "654321", "My second account")
    }

    fn name_value(name: &str) -> AttributeValue {
        AttributeValue::S(name.to_string())
    }

    // ==================== Table Tests ====================

    #[tokio::test]
    async fn test_list_tables_requests_one_page() {
        let list = mock!(aws_sdk_dynamodb::Client::list_tables)
            .match_requests(|req| req.limit() == Some(10))
            .then_output(|| {
                ListTablesOutput::builder()
                    .table_names("Accounts")
                    .table_names("Users")
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&list]);

        let tables = repo(client).list_tables().await.unwrap();

        assert_eq!(tables, vec!["Accounts".to_string(), "Users".to_string()]);
        assert_eq!(list.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_table_request_shape() {
        let create = mock!(aws_sdk_dynamodb::Client::create_table)
            .match_requests(|req| {
                let key_schema = req.key_schema();
                let definitions = req.attribute_definitions();
                let throughput = req.provisioned_throughput();

                req.table_name() == Some("Accounts")
                    && key_schema.len() == 1
                    && key_schema[0].attribute_name() == "AccountName"
                    && key_schema[0].key_type() == &KeyType::Hash
                    && definitions.len() == 1
                    && definitions[0].attribute_name() == "AccountName"
                    && definitions[0].attribute_type() == &ScalarAttributeType::S
                    && throughput.map(|t| t.read_capacity_units()) == Some(10)
                    && throughput.map(|t| t.write_capacity_units()) == Some(10)
            })
            .then_output(|| CreateTableOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&create]);

        repo(client).create_table().await.unwrap();

        assert_eq!(create.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_existing_table_is_already_exists() {
        let create = mock!(aws_sdk_dynamodb::Client::create_table).then_error(|| {
            CreateTableError::ResourceInUseException(ResourceInUseException::builder().build())
        });
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&create]);

        let result = repo(client).create_table().await;

        assert_eq!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Table",
                id: "Accounts".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_ensure_table_skips_listed_table() {
        let list = mock!(aws_sdk_dynamodb::Client::list_tables)
            .then_output(|| ListTablesOutput::builder().table_names("Accounts").build());
        let create = mock!(aws_sdk_dynamodb::Client::create_table)
            .then_output(|| CreateTableOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&list, &create]);

        assert!(!repo(client).ensure_table().await.unwrap());
        assert_eq!(create.num_calls(), 0);
    }

    #[tokio::test]
    async fn test_ensure_table_treats_in_use_as_existing() {
        let list = mock!(aws_sdk_dynamodb::Client::list_tables)
            .then_output(|| ListTablesOutput::builder().table_names("Other").build());
        let create = mock!(aws_sdk_dynamodb::Client::create_table).then_error(|| {
            CreateTableError::ResourceInUseException(ResourceInUseException::builder().build())
        });
        let describe = mock!(aws_sdk_dynamodb::Client::describe_table)
            .then_output(|| DescribeTableOutput::builder().build());
        let client = mock_client!(
            aws_sdk_dynamodb,
            RuleMode::MatchAny,
            [&list, &create, &describe]
        );

        assert!(!repo(client).ensure_table().await.unwrap());
        assert_eq!(create.num_calls(), 1);
        assert_eq!(describe.num_calls(), 0);
    }

    #[tokio::test]
    async fn test_ensure_table_creates_and_waits_for_active() {
        let list = mock!(aws_sdk_dynamodb::Client::list_tables)
            .then_output(|| ListTablesOutput::builder().build());
        let create = mock!(aws_sdk_dynamodb::Client::create_table)
            .then_output(|| CreateTableOutput::builder().build());
        let describe = mock!(aws_sdk_dynamodb::Client::describe_table)
            .match_requests(|req| req.table_name() == Some("Accounts"))
            .then_output(|| {
                DescribeTableOutput::builder()
                    .table(
                        TableDescription::builder()
                            .table_status(TableStatus::Active)
                            .build(),
                    )
                    .build()
            });
        let client = mock_client!(
            aws_sdk_dynamodb,
            RuleMode::MatchAny,
            [&list, &create, &describe]
        );

        assert!(repo(client).ensure_table().await.unwrap());
        assert_eq!(create.num_calls(), 1);
        assert_eq!(describe.num_calls(), 1);
    }

    // ==================== Account CRUD Tests ====================

    #[tokio::test]
    async fn test_put_account_writes_key_and_payload() {
        let put = mock!(aws_sdk_dynamodb::Client::put_item)
            .match_requests(|req| {
                req.table_name() == Some("Accounts")
                    && req.item() == Some(&account_to_item(&foo()))
                    && req.condition_expression().is_none()
            })
            .then_output(|| PutItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&put]);

        repo(client).put_account(&foo()).await.unwrap();

        assert_eq!(put.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_find_account_sends_consistent_single_row_query() {
        let query = mock!(aws_sdk_dynamodb::Client::query)
            .match_requests(|req| {
                req.table_name() == Some("Accounts")
                    && req.key_condition_expression() == Some("AccountName = :nameValue")
                    && req
                        .expression_attribute_values()
                        .and_then(|values| values.get(":nameValue"))
                        == Some(&name_value("Foo"))
                    && req.consistent_read() == Some(true)
                    && req.limit() == Some(1)
            })
            .then_output(|| {
                QueryOutput::builder()
                    .items(account_to_item(&foo()))
                    .count(1)
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&query]);

        let found = repo(client).find_account("Foo").await.unwrap();

        assert_eq!(found, Some(foo()));
        assert_eq!(query.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_find_account_no_rows_is_none() {
        let query = mock!(aws_sdk_dynamodb::Client::query)
            .then_output(|| QueryOutput::builder().count(0).build());
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&query]);

        assert_eq!(repo(client).find_account("Nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_account_duplicate_rows_is_invalid_data() {
        let query = mock!(aws_sdk_dynamodb::Client::query).then_output(|| {
            QueryOutput::builder()
                .items(account_to_item(&foo()))
                .items(account_to_item(&foo().with_description("copy")))
                .count(2)
                .build()
        });
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&query]);

        let result = repo(client).find_account("Foo").await;

        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_list_accounts_sends_consistent_capped_scan() {
        let scan = mock!(aws_sdk_dynamodb::Client::scan)
            .match_requests(|req| {
                req.table_name() == Some("Accounts")
                    && req.consistent_read() == Some(true)
                    && req.limit() == Some(100)
            })
            .then_output(|| {
                ScanOutput::builder()
                    .items(account_to_item(&foo()))
                    .items(account_to_item(&fum()))
                    .count(2)
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&scan]);

        let accounts = repo(client).list_accounts().await.unwrap();

        assert_eq!(accounts, vec![foo(), fum()]);
        assert_eq!(scan.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_list_accounts_rejects_malformed_payload() {
        let scan = mock!(aws_sdk_dynamodb::Client::scan).then_output(|| {
            let mut item = account_to_item(&foo());
            item.insert(
                "Data".to_string(),
                AttributeValue::M(HashMap::from([(
                    "object".to_string(),
                    AttributeValue::S("not a map".to_string()),
                )])),
            );
            ScanOutput::builder().items(item).count(1).build()
        });
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&scan]);

        let result = repo(client).list_accounts().await;

        assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_delete_account_is_unconditional() {
        let delete = mock!(aws_sdk_dynamodb::Client::delete_item)
            .match_requests(|req| {
                req.table_name() == Some("Accounts")
                    && req.key().and_then(|key| key.get("AccountName")) == Some(&name_value("Foo"))
                    && req.condition_expression().is_none()
            })
            .then_output(|| DeleteItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&delete]);

        repo(client).delete_account("Foo").await.unwrap();

        assert_eq!(delete.num_calls(), 1);
    }
}
