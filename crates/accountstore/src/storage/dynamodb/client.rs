//! AWS SDK client setup.

use accountstore_core::storage::{RepositoryError, Result};
use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::Client;

use crate::config::{Config, Mode};

/// Provider name attached to the static credentials used against the emulator.
const LOCAL_CREDENTIALS_PROVIDER: &str = "accountstore-local";

/// Checks that `config` describes a usable connection.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.region.trim().is_empty() {
        return Err(RepositoryError::ConnectionFailed(
            "region must not be empty".to_string(),
        ));
    }

    match config.mode {
        Mode::Local => {
            let endpoint = config.local_endpoint.as_str();
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(RepositoryError::ConnectionFailed(format!(
                    "local endpoint must be an http(s) URL: {}",
                    endpoint
                )));
            }
        }
        Mode::Remote => {
            if config.profile.trim().is_empty() {
                return Err(RepositoryError::ConnectionFailed(
                    "credentials profile must not be empty".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Creates a DynamoDB client for the configured mode.
///
/// Local mode talks to the emulator with static dummy credentials, since the
/// emulator does not authenticate requests but the SDK still signs them.
/// Remote mode resolves credentials from the named shared profile.
pub async fn create_client(config: &Config) -> Result<Client> {
    validate_config(config)?;

    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    sdk_config_loader = match config.mode {
        Mode::Local => sdk_config_loader
            .endpoint_url(&config.local_endpoint)
            .credentials_provider(Credentials::new(
                "local",
                "local",
                None,
                None,
                LOCAL_CREDENTIALS_PROVIDER,
            )),
        Mode::Remote => sdk_config_loader.profile_name(&config.profile),
    };

    let sdk_config = sdk_config_loader.load().await;
    tracing::debug!(endpoint = %config.target_display(), "created DynamoDB client");

    Ok(Client::new(&sdk_config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: Mode) -> Config {
        Config::from_lookup(mode, |_| None)
    }

    #[test]
    fn test_default_configs_are_valid() {
        assert!(validate_config(&config(Mode::Local)).is_ok());
        assert!(validate_config(&config(Mode::Remote)).is_ok());
    }

    #[test]
    fn test_empty_region_is_rejected() {
        let mut config = config(Mode::Remote);
        config.region = "  ".to_string();

        assert!(matches!(
            validate_config(&config),
            Err(RepositoryError::ConnectionFailed(_))
        ));
    }

    #[test]
    fn test_local_endpoint_requires_scheme() {
        let mut config = config(Mode::Local);
        config.local_endpoint = "127.0.0.1:8000".to_string();

        assert!(matches!(
            validate_config(&config),
            Err(RepositoryError::ConnectionFailed(_))
        ));
    }

    #[test]
    fn test_empty_profile_rejected_only_in_remote_mode() {
        let mut remote = config(Mode::Remote);
        remote.profile = String::new();
        assert!(validate_config(&remote).is_err());

        let mut local = config(Mode::Local);
        local.profile = String::new();
        assert!(validate_config(&local).is_ok());
    }

    #[tokio::test]
    async fn test_create_client_rejects_invalid_config() {
        let mut config = config(Mode::Local);
        config.local_endpoint = "localhost".to_string();

        let result = create_client(&config).await;
        assert!(matches!(result, Err(RepositoryError::ConnectionFailed(_))));
    }
}
