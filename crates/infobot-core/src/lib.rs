//! Foundational low-level utilities shared across infobot crates.
//!
//! Provides time helpers used to stamp operator reports and char-safe
//! truncation used wherever free-form text is embedded in a bounded message.

pub mod text_utils;
pub mod time_utils;

pub use text_utils::{truncate_chars, truncate_with_marker};
pub use time_utils::{format_utc_timestamp, utc_timestamp_now};
