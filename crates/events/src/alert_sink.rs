//! Default alert delivery.
//!
//! [`AlertLogSink`] subscribes to the [`EventBus`](crate::bus::EventBus) and
//! reports every `health.alert_raised` event through `tracing`. It runs as a
//! long-lived background task and shuts down when the bus sender is dropped.

use tokio::sync::broadcast;

use crate::bus::{HealthEvent, EVENT_ALERT_RAISED};

/// Background service that logs raised health alerts.
pub struct AlertLogSink;

impl AlertLogSink {
    /// Run the sink loop until the channel is closed.
    ///
    /// Returns the number of alerts reported.
    pub async fn run(mut receiver: broadcast::Receiver<HealthEvent>) -> usize {
        let mut reported = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if Self::report(&event) {
                        reported += 1;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Alert sink lagged, some alerts were not reported");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, alert sink shutting down");
                    break;
                }
            }
        }
        reported
    }

    /// Report a single event. Returns `false` for events that are not alerts.
    fn report(event: &HealthEvent) -> bool {
        if event.event_type != EVENT_ALERT_RAISED {
            return false;
        }

        let alert_type = event.payload["alert_type"].as_str().unwrap_or("UNKNOWN");
        let message = event.payload["message"].as_str().unwrap_or_default();

        if alert_type == "CRITICAL" {
            tracing::error!(project_id = event.project_id, alert_type, message, "Health alert raised");
        } else {
            tracing::warn!(project_id = event.project_id, alert_type, message, "Health alert raised");
        }
        true
    }
}
