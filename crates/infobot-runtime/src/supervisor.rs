//! Outer lifetime of the event stream.
//!
//! `Running -> Backoff -> Running` on every stream failure, `Stopped` only
//! once shutdown is requested. The backoff is fixed and restarts are
//! unbounded.

use std::time::Duration;

use tokio::sync::watch;

use crate::error_reporter::{DeliveryOutcome, ErrorReporter, FailureScope};
use crate::event_stream::EventStream;

pub const DEFAULT_RESTART_BACKOFF: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Running,
    Backoff,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorSummary {
    pub restarts: u64,
    /// Stream-failure reports the operator actually received.
    pub reports_dispatched: u64,
    pub final_state: SupervisorState,
}

pub struct Supervisor<S> {
    stream: S,
    reporter: ErrorReporter,
    backoff: Duration,
    shutdown: watch::Receiver<bool>,
    state: SupervisorState,
    restarts: u64,
    reports_dispatched: u64,
}

impl<S: EventStream> Supervisor<S> {
    pub fn new(
        stream: S,
        reporter: ErrorReporter,
        backoff: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            stream,
            reporter,
            backoff,
            shutdown,
            state: SupervisorState::Running,
            restarts: 0,
            reports_dispatched: 0,
        }
    }

    /// Drives the stream until shutdown is requested.
    pub async fn run(mut self) -> SupervisorSummary {
        loop {
            self.transition(SupervisorState::Running);
            let outcome = tokio::select! {
                biased;
                _ = wait_for_shutdown(&mut self.shutdown) => None,
                result = self.stream.run() => Some(result),
            };
            match outcome {
                None => break,
                Some(Ok(())) => {
                    tracing::info!("event stream ended; scheduling restart");
                }
                Some(Err(error)) => {
                    tokio::select! {
                        biased;
                        _ = wait_for_shutdown(&mut self.shutdown) => break,
                        delivery = self
                            .reporter
                            .report_failure(FailureScope::Stream, &error, None) => {
                            if delivery == DeliveryOutcome::Delivered {
                                self.reports_dispatched = self.reports_dispatched.saturating_add(1);
                            }
                        }
                    }
                }
            }

            self.transition(SupervisorState::Backoff);
            tokio::select! {
                biased;
                _ = wait_for_shutdown(&mut self.shutdown) => break,
                _ = tokio::time::sleep(self.backoff) => {}
            }
            self.restarts = self.restarts.saturating_add(1);
        }

        self.transition(SupervisorState::Stopped);
        SupervisorSummary {
            restarts: self.restarts,
            reports_dispatched: self.reports_dispatched,
            final_state: self.state,
        }
    }

    fn transition(&mut self, next: SupervisorState) {
        tracing::info!(
            from = ?self.state,
            to = ?next,
            restarts = self.restarts,
            backoff_ms = self.backoff.as_millis() as u64,
            "supervisor state transition"
        );
        self.state = next;
    }
}

/// Resolves once `true` is published. A dropped sender never resolves.
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|requested| *requested).await.is_err() {
        std::future::pending::<()>().await;
    }
}
