use clap::Parser;
use server::{ExpenseStore, ServerState};

mod settings;

#[derive(Debug, Parser)]
#[command(version, about = "Shared expense ledger server")]
struct Args {
    /// Settings file, without extension.
    #[arg(long, env = "SPLITLEDGER_CONFIG", default_value = "settings")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let settings = settings::Settings::new(&args.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitledger={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Serving expenses from memory");

    server::run_with_listener(ServerState::new(ExpenseStore::new()), listener).await?;

    Ok(())
}
