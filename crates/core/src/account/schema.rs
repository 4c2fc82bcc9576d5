//! Table schema for stored accounts (pure data, no I/O).

/// Name of the table holding accounts.
pub const ACCOUNTS_TABLE: &str = "Accounts";

/// Partition key attribute. Holds `Account::name`.
pub const ACCOUNT_NAME_ATTRIBUTE: &str = "AccountName";

/// Map attribute wrapping the serialized account.
pub const DATA_ATTRIBUTE: &str = "Data";

/// Key inside [`DATA_ATTRIBUTE`] holding the account payload.
pub const DATA_OBJECT_KEY: &str = "object";

pub const READ_CAPACITY_UNITS: i64 = 10;
pub const WRITE_CAPACITY_UNITS: i64 = 10;

/// Maximum number of table names returned by a single listing.
pub const LIST_TABLES_PAGE_SIZE: i32 = 10;

/// Maximum number of accounts returned by a single scan.
pub const SCAN_PAGE_SIZE: i32 = 100;

/// Returns true if `target` is one of `names`. Exact, case-sensitive match.
pub fn table_exists<S: AsRef<str>>(names: &[S], target: &str) -> bool {
    names.iter().any(|name| name.as_ref() == target)
}
