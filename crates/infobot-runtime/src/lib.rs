//! Entity-info bot runtime: routing, aggregation, report formatting, and the
//! supervisor that keeps the polling stream alive.

pub mod aggregator;
pub mod bot_runtime;
pub mod commands;
pub mod error_reporter;
pub mod event_stream;
pub mod formatter;
pub mod handlers;
pub mod render;
pub mod router;
pub mod subject;
pub mod supervisor;

#[cfg(test)]
mod test_support;

pub use aggregator::{ChatInfoRequest, EntityInfoAggregator};
pub use bot_runtime::{run_info_bot, InfoBotRuntimeConfig};
pub use error_reporter::{DeliveryOutcome, ErrorReport, ErrorReporter, FailureScope, OperatorConfig};
pub use event_stream::{EventStream, PollingEventStream};
pub use formatter::{format_chat_report, format_subject, format_user_report};
pub use router::{Route, UpdateRouter};
pub use subject::{ChatSubject, Subject, TriState, UserSubject};
pub use supervisor::{Supervisor, SupervisorState, SupervisorSummary};
