use accountstore::{demo, storage::DynamoDbRepository, Config, Mode};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Accountstore - store and look up accounts in DynamoDB
#[derive(Parser, Debug)]
#[command(name = "accountstore")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Pass `local` to use the DynamoDB emulator at 127.0.0.1:8000.
    /// Anything else, or nothing, targets the remote service.
    /// Only the first argument is read.
    #[arg(value_name = "MODE", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl Cli {
    fn mode(&self) -> Mode {
        Mode::from_arg(self.args.first().map(String::as_str))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accountstore=info,accountstore_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mode = cli.mode();
    let config = Config::from_env(mode);

    let repo = DynamoDbRepository::open(&config).await?;

    // Only the emulator gets its schema from here. Remote tables are
    // provisioned out of band; this program has no rights to change them.
    let report = demo::run(&repo, mode.is_local()).await?;

    println!("{}", serde_json::to_string_pretty(&report.after_delete)?);

    drop(repo);
    tracing::info!("connection closed");
    Ok(())
}
