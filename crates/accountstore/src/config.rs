use std::env;

use accountstore_core::account::ACCOUNTS_TABLE;

/// Default region for the remote service.
pub const DEFAULT_REGION: &str = "eu-central-1";
/// Default address of the local DynamoDB emulator.
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://127.0.0.1:8000";
/// Default shared-credentials profile for the remote service.
pub const DEFAULT_PROFILE: &str = "home-cloud";

/// Which backend to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Local DynamoDB emulator, no authentication.
    Local,
    /// Remote DynamoDB using a named credentials profile.
    Remote,
}

impl Mode {
    /// Selects the mode from the first command-line argument.
    ///
    /// Only the literal `local` selects [`Mode::Local`].
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("local") => Mode::Local,
            _ => Mode::Remote,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Mode::Local)
    }
}

/// Connection configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    /// AWS region (default: "eu-central-1")
    pub region: String,
    /// Local emulator endpoint (default: "http://127.0.0.1:8000")
    pub local_endpoint: String,
    /// Shared credentials profile used in remote mode (default: "home-cloud")
    pub profile: String,
    /// Accounts table name (default: "Accounts")
    pub table_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ACCOUNTSTORE_REGION` - AWS region (default: "eu-central-1")
    /// - `ACCOUNTSTORE_LOCAL_ENDPOINT` - Local emulator URL (default: "http://127.0.0.1:8000")
    /// - `ACCOUNTSTORE_PROFILE` - Credentials profile (default: "home-cloud")
    /// - `ACCOUNTSTORE_TABLE_NAME` - Table name (default: "Accounts")
    pub fn from_env(mode: Mode) -> Self {
        Self::from_lookup(mode, |key| env::var(key).ok())
    }

    /// Load configuration using `lookup` to resolve variables.
    pub fn from_lookup(mode: Mode, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            mode,
            region: lookup("ACCOUNTSTORE_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            local_endpoint: lookup("ACCOUNTSTORE_LOCAL_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_LOCAL_ENDPOINT.to_string()),
            profile: lookup("ACCOUNTSTORE_PROFILE").unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            table_name: lookup("ACCOUNTSTORE_TABLE_NAME")
                .unwrap_or_else(|| ACCOUNTS_TABLE.to_string()),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match self.mode {
            Mode::Local => format!("Local DynamoDB ({})", self.local_endpoint),
            Mode::Remote => format!(
                "AWS DynamoDB (region: {}, profile: {})",
                self.region, self.profile
            ),
        }
    }
}
