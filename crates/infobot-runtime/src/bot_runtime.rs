//! Start-up sequence and wiring for the info bot.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use infobot_telegram::TelegramApi;
use tokio::sync::watch;

use crate::commands::register_command_menus;
use crate::error_reporter::{ErrorReporter, OperatorConfig};
use crate::event_stream::{PollingEventStream, DEFAULT_POLL_TIMEOUT_SECONDS};
use crate::router::UpdateRouter;
use crate::supervisor::{Supervisor, SupervisorSummary, DEFAULT_RESTART_BACKOFF};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoBotRuntimeConfig {
    pub poll_timeout_seconds: u64,
    pub restart_backoff: Duration,
    pub operator: OperatorConfig,
    pub register_commands: bool,
}

impl Default for InfoBotRuntimeConfig {
    fn default() -> Self {
        Self {
            poll_timeout_seconds: DEFAULT_POLL_TIMEOUT_SECONDS,
            restart_backoff: DEFAULT_RESTART_BACKOFF,
            operator: OperatorConfig::default(),
            register_commands: true,
        }
    }
}

/// Clears any webhook, learns the bot's username, registers command menus,
/// then supervises the polling stream until `shutdown` turns `true`.
pub async fn run_info_bot(
    api: Arc<dyn TelegramApi>,
    config: InfoBotRuntimeConfig,
    shutdown: watch::Receiver<bool>,
) -> Result<SupervisorSummary> {
    api.delete_webhook(true)
        .await
        .context("failed to delete telegram webhook")?;

    let bot_username = match api.get_me().await {
        Ok(me) => me.username,
        Err(error) => {
            tracing::warn!(error = %error, "getMe failed; accepting commands addressed to any bot");
            None
        }
    };
    tracing::info!(bot_username = ?bot_username, "bot identity resolved");

    if config.register_commands {
        if let Err(error) = register_command_menus(api.as_ref()).await {
            tracing::warn!(error = %error, "failed to register command menus");
        }
    }

    if config.operator.operator_chat_id.is_none() {
        tracing::warn!("no operator chat configured; failure reports will only be logged");
    }
    let reporter = ErrorReporter::new(api.clone(), config.operator);
    let stream = PollingEventStream::new(
        api,
        UpdateRouter::new(bot_username),
        reporter.clone(),
        config.poll_timeout_seconds,
    );
    let summary = Supervisor::new(stream, reporter, config.restart_backoff, shutdown)
        .run()
        .await;
    tracing::info!(
        restarts = summary.restarts,
        reports_dispatched = summary.reports_dispatched,
        "info bot stopped"
    );
    Ok(summary)
}
