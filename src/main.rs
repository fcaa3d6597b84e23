use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use farmacia_assistant::api::{self, AppState};
use farmacia_assistant::assistant::Assistant;
use farmacia_assistant::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Chat and prescription endpoints under `/ai`.
    Server,
    /// Single chat handler at `/api/chat`.
    Serverless,
}

#[derive(Debug, Parser)]
#[command(name = "farmacia-assistant")]
#[command(about = "AI assistant endpoints for the pharmacy storefront")]
struct CliArgs {
    /// Deployment shape to serve.
    #[arg(long, value_enum, default_value_t = Mode::Server)]
    mode: Mode,

    /// Listening port; overrides `PORT`.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farmacia_assistant=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = Config::from_env();
    let port = args.port.unwrap_or(config.port);

    info!("Starting farmacia-assistant ({:?} mode)", args.mode);

    let state = AppState::new(Assistant::from_config(&config));
    let app = match args.mode {
        Mode::Server => api::router(state),
        Mode::Serverless => api::serverless_router(state),
    };

    api::serve(app, port)
        .await
        .with_context(|| format!("server on port {} failed", port))?;

    info!("Server stopped");
    Ok(())
}
