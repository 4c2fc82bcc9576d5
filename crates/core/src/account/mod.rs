mod schema;
mod types;

pub use schema::{
    table_exists, ACCOUNTS_TABLE, ACCOUNT_NAME_ATTRIBUTE, DATA_ATTRIBUTE, DATA_OBJECT_KEY,
    LIST_TABLES_PAGE_SIZE, READ_CAPACITY_UNITS, SCAN_PAGE_SIZE, WRITE_CAPACITY_UNITS,
};
pub use types::Account;
