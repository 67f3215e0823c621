//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`HealthEvent`]s. It is
//! shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use finhealth_core::evaluation::EvaluationOutcome;
use finhealth_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Published after every successful evaluation.
pub const EVENT_HEALTH_EVALUATED: &str = "health.evaluated";
/// Published when an evaluation raised an alert.
pub const EVENT_ALERT_RAISED: &str = "health.alert_raised";

// ---------------------------------------------------------------------------
// HealthEvent
// ---------------------------------------------------------------------------

/// A domain event about a project's health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthEvent {
    /// Dot-separated event name, e.g. `"health.alert_raised"`.
    pub event_type: String,

    /// Project the event concerns.
    pub project_id: DbId,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl HealthEvent {
    /// Create a new event with an empty payload.
    pub fn new(event_type: impl Into<String>, project_id: DbId) -> Self {
        Self {
            event_type: event_type.into(),
            project_id,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Events describing one evaluation: always `health.evaluated`, followed
    /// by `health.alert_raised` when the evaluation raised an alert.
    pub fn from_outcome(outcome: &EvaluationOutcome) -> Vec<Self> {
        let project_id = outcome.snapshot.project_id;
        let mut events = vec![Self::new(EVENT_HEALTH_EVALUATED, project_id).with_payload(
            serde_json::json!({
                "snapshot_id": outcome.snapshot.id,
                "previous_status": outcome.previous_status,
                "new_status": outcome.new_status,
                "health_score": outcome.snapshot.metrics.health_score,
            }),
        )];

        if let Some(alert) = &outcome.alert {
            events.push(
                Self::new(EVENT_ALERT_RAISED, project_id).with_payload(serde_json::json!({
                    "alert_id": alert.id,
                    "alert_type": alert.alert_type,
                    "message": alert.message,
                })),
            );
        }
        events
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`HealthEvent`].
pub struct EventBus {
    sender: broadcast::Sender<HealthEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: HealthEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<HealthEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
