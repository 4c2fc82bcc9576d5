use async_trait::async_trait;

use crate::account::Account;

use super::Result;

/// Repository for account operations.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Writes an account, replacing any account with the same name.
    async fn put_account(&self, account: &Account) -> Result<()>;

    /// Gets an account by its name.
    async fn find_account(&self, name: &str) -> Result<Option<Account>>;

    /// Lists stored accounts, up to one page.
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Deletes an account by its name. Deleting a missing account succeeds.
    async fn delete_account(&self, name: &str) -> Result<()>;
}

/// Table-level operations on the backend.
#[async_trait]
pub trait TableCatalog: Send + Sync {
    /// Name of the accounts table this catalog manages.
    fn table_name(&self) -> &str;

    /// Lists table names known to the backend, up to one page.
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Creates the accounts table. Fails if it already exists.
    async fn create_table(&self) -> Result<()>;

    /// Creates the accounts table unless it is already listed.
    ///
    /// Returns true if the table was created.
    async fn ensure_table(&self) -> Result<bool>;
}
