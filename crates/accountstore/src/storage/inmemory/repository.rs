//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use accountstore_core::account::{table_exists, Account, LIST_TABLES_PAGE_SIZE, SCAN_PAGE_SIZE};
use accountstore_core::storage::{AccountRepository, RepositoryError, Result, TableCatalog};
use async_trait::async_trait;
use tokio::sync::RwLock;

type Tables = BTreeMap<String, BTreeMap<String, Account>>;

/// In-memory storage backend for testing.
///
/// Clones share the same tables, so several repositories bound to different
/// table names can see each other's tables in `list_tables`.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    table_name: String,
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a repository with no tables.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            tables: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Returns a repository bound to `table_name` over the same storage.
    pub fn for_table(&self, table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            tables: Arc::clone(&self.tables),
        }
    }

    fn table_not_found(&self) -> RepositoryError {
        RepositoryError::NotFound {
            entity_type: "Table",
            id: self.table_name.clone(),
        }
    }
}

#[async_trait]
impl TableCatalog for InMemoryRepository {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let tables = self.tables.read().await;
        Ok(tables
            .keys()
            .take(LIST_TABLES_PAGE_SIZE as usize)
            .cloned()
            .collect())
    }

    async fn create_table(&self) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(&self.table_name) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Table",
                id: self.table_name.clone(),
            });
        }
        tables.insert(self.table_name.clone(), BTreeMap::new());
        Ok(())
    }

    async fn ensure_table(&self) -> Result<bool> {
        if table_exists(&self.list_tables().await?, &self.table_name) {
            return Ok(false);
        }
        match self.create_table().await {
            Ok(()) => Ok(true),
            Err(RepositoryError::AlreadyExists { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryRepository {
    async fn put_account(&self, account: &Account) -> Result<()> {
        let mut tables = self.tables.write().await;
        let accounts = tables
            .get_mut(&self.table_name)
            .ok_or_else(|| self.table_not_found())?;
        accounts.insert(account.name.clone(), account.clone());
        Ok(())
    }

    async fn find_account(&self, name: &str) -> Result<Option<Account>> {
        let tables = self.tables.read().await;
        let accounts = tables
            .get(&self.table_name)
            .ok_or_else(|| self.table_not_found())?;
        Ok(accounts.get(name).cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let tables = self.tables.read().await;
        let accounts = tables
            .get(&self.table_name)
            .ok_or_else(|| self.table_not_found())?;
        Ok(accounts
            .values()
            .take(SCAN_PAGE_SIZE as usize)
            .cloned()
            .collect())
    }

    async fn delete_account(&self, name: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        let accounts = tables
            .get_mut(&self.table_name)
            .ok_or_else(|| self.table_not_found())?;
        accounts.remove(name);
        Ok(())
    }
}
