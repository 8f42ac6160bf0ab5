use clap::Parser;
use ghl::cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout stays valid JSON.
    if std::env::var("GHL_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_env("GHL_LOG"))
            .with_writer(std::io::stderr)
            .try_init();
    }

    let cli = Cli::parse();
    ghl::cli::run(cli).await
}
