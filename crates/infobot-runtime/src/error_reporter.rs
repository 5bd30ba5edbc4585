//! Operator notifications for failures that escaped a handler or the
//! event stream.
//!
//! [`ErrorReporter::report_failure`] returns a [`DeliveryOutcome`] and has
//! no error path: it runs inside the last line of defense.

use std::sync::Arc;

use infobot_core::{truncate_with_marker, utc_timestamp_now};
use infobot_telegram::{TelegramApi, TelegramApiError, Update};

pub const REPORT_CONTEXT_MAX_CHARS: usize = 1_500;
pub const REPORT_TRUNCATION_MARKER: &str = "…";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Where the operator notification is sent.
pub struct OperatorConfig {
    pub operator_chat_id: Option<i64>,
}

impl OperatorConfig {
    /// Parses the raw operator identity. Absent, blank, zero or non-numeric
    /// input disables notifications; the last two cases are logged.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Self::default();
        };
        match raw.parse::<i64>() {
            Ok(0) => {
                tracing::warn!("operator id 0 is not a chat; failure reports are disabled");
                Self::default()
            }
            Ok(operator_chat_id) => Self {
                operator_chat_id: Some(operator_chat_id),
            },
            Err(_) => {
                tracing::warn!(owner_id = raw, "operator id is set but is not a number");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureScope {
    Handler,
    Stream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub scope: FailureScope,
    pub timestamp: String,
    pub kind: String,
    pub message: String,
    pub context: Option<String>,
}

impl ErrorReport {
    pub fn new(scope: FailureScope, error: &anyhow::Error, update: Option<&Update>) -> Self {
        Self::at(utc_timestamp_now(), scope, error, update)
    }

    pub fn at(
        timestamp: String,
        scope: FailureScope,
        error: &anyhow::Error,
        update: Option<&Update>,
    ) -> Self {
        Self {
            scope,
            timestamp,
            kind: failure_kind(error).to_string(),
            message: format!("{error:#}"),
            context: update.map(serialize_update_context),
        }
    }

    pub fn render(&self) -> String {
        let headline = match self.scope {
            FailureScope::Handler => format!("⚠️ Ошибка {}", self.timestamp),
            FailureScope::Stream => format!("⚠️ Polling упал {}", self.timestamp),
        };
        let mut parts = vec![headline, format!("{}: {}", self.kind, self.message)];
        if let Some(context) = self.context.as_deref().filter(|value| !value.is_empty()) {
            parts.push(context.to_string());
        }
        parts.join("\n")
    }
}

/// Name of the most specific known failure in `error`'s chain.
pub fn failure_kind(error: &anyhow::Error) -> &'static str {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<TelegramApiError>())
        .map(TelegramApiError::kind)
        .unwrap_or("Error")
}

/// Serialized update prefixed with `Update: `, capped at
/// [`REPORT_CONTEXT_MAX_CHARS`]. Falls back to the debug representation
/// when JSON encoding fails.
pub fn serialize_update_context(update: &Update) -> String {
    let raw = match serde_json::to_string(update) {
        Ok(encoded) => encoded,
        Err(error) => {
            tracing::debug!(error = %error, "update serialization failed; using debug form");
            format!("{update:?}")
        }
    };
    truncate_with_marker(
        &format!("Update: {raw}"),
        REPORT_CONTEXT_MAX_CHARS,
        REPORT_TRUNCATION_MARKER,
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// No operator is configured.
    Skipped,
    Failed { error: String },
}

#[derive(Clone)]
pub struct ErrorReporter {
    api: Arc<dyn TelegramApi>,
    operator: OperatorConfig,
}

impl ErrorReporter {
    pub fn new(api: Arc<dyn TelegramApi>, operator: OperatorConfig) -> Self {
        Self { api, operator }
    }

    /// Logs the failure, builds a report, and forwards it to the operator.
    pub async fn report_failure(
        &self,
        scope: FailureScope,
        error: &anyhow::Error,
        update: Option<&Update>,
    ) -> DeliveryOutcome {
        tracing::error!(
            scope = ?scope,
            update_id = update.map(|update| update.update_id),
            error = %format!("{error:#}"),
            "unhandled failure"
        );
        let report = ErrorReport::new(scope, error, update);
        self.deliver(&report).await
    }

    pub async fn deliver(&self, report: &ErrorReport) -> DeliveryOutcome {
        let Some(operator_chat_id) = self.operator.operator_chat_id else {
            return DeliveryOutcome::Skipped;
        };
        match self
            .api
            .send_message(operator_chat_id, &report.render(), None)
            .await
        {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(error) => {
                tracing::error!(
                    operator_chat_id,
                    error = %error,
                    "failed to deliver failure report to operator"
                );
                DeliveryOutcome::Failed {
                    error: error.to_string(),
                }
            }
        }
    }
}
