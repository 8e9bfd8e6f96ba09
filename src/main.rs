use clap::Parser;
use insertion_sync::cli::Cli;
use insertion_sync::{commands, InsertionError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli).await {
        eprintln!("Error: {e:#}");
        let code = e
            .downcast_ref::<InsertionError>()
            .map_or(1, InsertionError::exit_code);
        std::process::exit(code);
    }
}
