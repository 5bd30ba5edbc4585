mod bootstrap_helpers;
mod cli_args;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use infobot_runtime::{run_info_bot, InfoBotRuntimeConfig, OperatorConfig};
use infobot_telegram::{TelegramApiClient, TelegramClientConfig};
use tokio::sync::watch;

use crate::bootstrap_helpers::init_tracing;
use crate::cli_args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional; real environment variables take precedence.
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();
    run_cli(cli).await
}

async fn run_cli(cli: Cli) -> Result<()> {
    validate_timeouts(&cli)?;
    let client = TelegramApiClient::new(TelegramClientConfig {
        api_base: cli.api_base.clone(),
        bot_token: cli.bot_token.clone(),
        request_timeout_ms: cli.request_timeout_ms,
        retry_max_attempts: cli.retry_max_attempts,
        retry_base_delay_ms: cli.retry_base_delay_ms,
    })
    .context("failed to build telegram client")?;

    let config = runtime_config(&cli);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    let summary = run_info_bot(Arc::new(client), config, shutdown_rx).await?;
    tracing::info!(
        restarts = summary.restarts,
        reports_dispatched = summary.reports_dispatched,
        final_state = ?summary.final_state,
        "infobot exited"
    );
    Ok(())
}

fn runtime_config(cli: &Cli) -> InfoBotRuntimeConfig {
    InfoBotRuntimeConfig {
        poll_timeout_seconds: cli.poll_timeout_seconds,
        restart_backoff: Duration::from_millis(cli.restart_backoff_ms),
        operator: OperatorConfig::from_raw(cli.owner_id.as_deref()),
        register_commands: !cli.skip_command_registration,
    }
}

fn validate_timeouts(cli: &Cli) -> Result<()> {
    let poll_window_ms = cli.poll_timeout_seconds.saturating_mul(1_000);
    if cli.request_timeout_ms <= poll_window_ms {
        bail!(
            "--request-timeout-ms ({}) must exceed --poll-timeout-seconds ({}s)",
            cli.request_timeout_ms,
            cli.poll_timeout_seconds
        );
    }
    Ok(())
}
