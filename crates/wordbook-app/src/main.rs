use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use wordbook_core::{Notebook, load_profile};

mod config;
mod context;
mod controller;
mod events;
mod io;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use crate::context::Services;
use crate::controller::AppController;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "wordbook", about = "Vocabulary notebook with an AI tutor", version)]
struct Cli {
    /// JSON config file; replaces environment-derived settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding setup.json and notebook.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep the notebook in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Decode speech without opening an audio device
    #[arg(long)]
    headless_audio: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let code = match app_main(cli).await {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!("application error: {:#}", err);
            1
        }
    };

    // Blocking stdin reads would otherwise hold the runtime open
    std::process::exit(code);
}

async fn app_main(cli: Cli) -> anyhow::Result<()> {
    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }
    config.storage.ephemeral |= cli.ephemeral;
    config.audio.headless |= cli.headless_audio;

    let blobs = config::open_blob_store(&config.storage)?;
    let pair = load_profile(blobs.as_ref());
    let notebook = Notebook::load(blobs);
    let services = Services::from_config(&config).context("building service clients")?;

    let controller = AppController::new();
    let mut tasks = controller.spawn_tasks(AppState::new(pair, notebook), services);
    let cancel = controller.cancel_token();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        _ = cancel.cancelled() => {}
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("A task exited early"),
                Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
                Err(e) => tracing::error!("Task panicked: {}", e),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::debug!("Task ended with error during shutdown: {:#}", e);
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder
            .with_ansi(atty::is(atty::Stream::Stderr))
            .compact()
            .init();
    }
}
