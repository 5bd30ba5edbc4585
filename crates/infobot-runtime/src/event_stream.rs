//! Long-polling update stream.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use infobot_telegram::{TelegramApi, Update};

use crate::error_reporter::{ErrorReporter, FailureScope};
use crate::handlers::InfoBotHandlers;
use crate::router::{Route, UpdateRouter};

pub const DEFAULT_POLL_TIMEOUT_SECONDS: u64 = 30;

/// Source of updates driven by the supervisor. `run` only returns on a
/// stream-level failure or when the underlying source ends.
#[async_trait]
pub trait EventStream: Send {
    async fn run(&mut self) -> Result<()>;
}

pub struct PollingEventStream {
    api: Arc<dyn TelegramApi>,
    router: UpdateRouter,
    handlers: InfoBotHandlers,
    reporter: ErrorReporter,
    poll_timeout_seconds: u64,
    next_offset: Option<i64>,
}

impl PollingEventStream {
    pub fn new(
        api: Arc<dyn TelegramApi>,
        router: UpdateRouter,
        reporter: ErrorReporter,
        poll_timeout_seconds: u64,
    ) -> Self {
        Self {
            handlers: InfoBotHandlers::new(api.clone()),
            api,
            router,
            reporter,
            poll_timeout_seconds,
            next_offset: None,
        }
    }

    pub fn next_offset(&self) -> Option<i64> {
        self.next_offset
    }

    /// Fetches one batch and handles it in arrival order. Returns the number
    /// of updates received.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let updates = self
            .api
            .get_updates(self.next_offset, self.poll_timeout_seconds)
            .await
            .context("failed to poll telegram updates")?;
        let received = updates.len();
        for update in &updates {
            // Acknowledge before handling so a crash mid-handler is not replayed.
            self.next_offset = Some(update.update_id.saturating_add(1));
            self.dispatch(update).await;
        }
        if received > 0 {
            tracing::debug!(received, next_offset = ?self.next_offset, "handled update batch");
        }
        Ok(received)
    }

    async fn dispatch(&self, update: &Update) {
        let route = self.router.route(update);
        if route == Route::Ignore {
            return;
        }
        let Some(message) = update.payload() else {
            return;
        };
        tracing::debug!(update_id = update.update_id, route = ?route, "dispatching update");
        if let Err(error) = self.handlers.handle(route, message).await {
            self.reporter
                .report_failure(FailureScope::Handler, &error, Some(update))
                .await;
        }
    }
}

#[async_trait]
impl EventStream for PollingEventStream {
    async fn run(&mut self) -> Result<()> {
        tracing::info!(
            poll_timeout_seconds = self.poll_timeout_seconds,
            next_offset = ?self.next_offset,
            "polling started"
        );
        loop {
            self.poll_once().await?;
        }
    }
}
