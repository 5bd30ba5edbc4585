//! Telegram Bot API surface used by the infobot runtime.
//!
//! Provides the serde wire model, the typed [`TelegramApiError`], the
//! [`TelegramApi`] trait seam consumed by the runtime, and the retrying
//! HTTP implementation [`TelegramApiClient`].

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::TelegramApi;
pub use client::{TelegramApiClient, TelegramClientConfig};
pub use error::TelegramApiError;
pub use types::*;
