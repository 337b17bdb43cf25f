use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

/// Domain events emitted after state transitions are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Handover workflow events
    HandoverCreated {
        handover_id: Uuid,
        handover_number: String,
        asset_count: usize,
    },
    HandoverApprovalRecorded {
        handover_id: Uuid,
        approver_email: String,
        approved: bool,
    },
    HandoverApproved(Uuid),
    HandoverRejected(Uuid),

    // User events
    UserCreated(Uuid),
    UserLoggedIn(Uuid),

    // Operations events
    LeaveRequested(Uuid),
    LeaveStatusChanged {
        leave_id: Uuid,
        new_status: String,
    },
    MeetingScheduled(Uuid),
    TrainingPlanCreated(Uuid),
    TrainingPlanDeleted(Uuid),
    AttendanceMarked {
        user_id: Uuid,
        attendance_date: chrono::NaiveDate,
    },

    // Joiner/leaver events
    ProcessStarted(Uuid),
    ProcessChecklistUpdated {
        process_id: Uuid,
        progress_percentage: i32,
    },

    // Inventory events
    RoomsImported {
        created: usize,
        failed: usize,
        timestamp: DateTime<Utc>,
    },
    AssetRegistered(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel, logging each event. Runs for the lifetime of
/// the process; ends when every sender is dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    info!("event processor started");
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::HandoverApproved(id) => info!(handover_id = %id, "handover fully approved"),
            Event::HandoverRejected(id) => info!(handover_id = %id, "handover rejected"),
            Event::HandoverApprovalRecorded {
                handover_id,
                approver_email,
                approved,
            } => info!(
                handover_id = %handover_id,
                approver = %approver_email,
                approved = approved,
                "approval recorded"
            ),
            other => debug!(event = ?other, "event processed"),
        }
    }
    info!("event processor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);

        sender
            .send(Event::HandoverApproved(Uuid::new_v4()))
            .await
            .expect("send should succeed");

        assert!(matches!(rx.recv().await, Some(Event::HandoverApproved(_))));
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        let result = sender.send(Event::UserCreated(Uuid::new_v4())).await;
        assert!(result.is_err());
    }
}
