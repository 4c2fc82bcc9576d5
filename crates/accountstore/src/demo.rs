//! Fixed demonstration script run by the `accountstore` binary.

use accountstore_core::account::Account;
use accountstore_core::storage::{AccountRepository, Result, TableCatalog};

/// Outcome of a demonstration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// True if the accounts table was created during the run.
    pub table_created: bool,
    /// Result of looking up the first account right after writing it.
    pub found: Option<Account>,
    /// Accounts listed after both writes.
    pub before_delete: Vec<Account>,
    /// Accounts listed after deleting the first account.
    pub after_delete: Vec<Account>,
}

pub fn first_account() -> Account {
    Account::new("Foo", "123456", "My first account")
}

pub fn second_account() -> Account {
    Account::new("Fum", "654321", "My second account")
}

/// Runs the script against `repo`.
///
/// When `ensure_table` is set the accounts table is created if missing. Any
/// error stops the script and is returned to the caller.
pub async fn run<R>(repo: &R, ensure_table: bool) -> Result<DemoReport>
where
    R: AccountRepository + TableCatalog,
{
    let table_created = if ensure_table {
        let created = repo.ensure_table().await?;
        tracing::info!(table = repo.table_name(), created, "ensured table");
        created
    } else {
        false
    };

    let first = first_account();
    repo.put_account(&first).await?;
    tracing::info!(account = %first.name, "inserted account");

    let found = repo.find_account(&first.name).await?;
    tracing::info!(account = ?found, "find account");

    let second = second_account();
    repo.put_account(&second).await?;
    tracing::info!(account = %second.name, "inserted account");

    let before_delete = repo.list_accounts().await?;
    tracing::info!(count = before_delete.len(), "listed accounts");

    repo.delete_account(&first.name).await?;
    tracing::info!(account = %first.name, "deleted account");

    let after_delete = repo.list_accounts().await?;
    tracing::info!(count = after_delete.len(), "listed accounts");

    Ok(DemoReport {
        table_created,
        found,
        before_delete,
        after_delete,
    })
}
