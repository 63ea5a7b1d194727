use cortex_list::cli::{self, Invocation};
use cortex_list::config::API_KEY_VAR;
use cortex_list::{Config, HiveClient};
use std::io;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Diagnostics go to stderr so the listing on stdout stays clean.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn execute(invocation: Invocation) -> cortex_list::Result<()> {
    let config = Config::load();
    if matches!(invocation, Invocation::Run(_)) && config.uses_placeholder_key() {
        warn!("{} is not set, requests will use a placeholder key", API_KEY_VAR);
    }

    let client = HiveClient::new(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::run(invocation, &config, &client, &mut out).await?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let invocation = Invocation::parse(std::env::args_os());
    // Failures are reported, never turned into a non-zero exit status.
    if let Err(e) = execute(invocation).await {
        eprintln!("Error: {:#}", e);
    }
}
