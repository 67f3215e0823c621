//! Health event bus and alert sink.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`HealthEvent`]: the event envelope published after each evaluation.
//! - [`AlertLogSink`]: background subscriber that reports raised alerts.

pub mod alert_sink;
pub mod bus;

pub use alert_sink::AlertLogSink;
pub use bus::{EventBus, HealthEvent};
