use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::event::{EventSnapshot, ReturnSnapshot};

/// Kind-specific attached data, discriminated by the `type` field on the wire.
///
/// One case per notification kind instead of an open bag of optional fields;
/// each case carries exactly the snapshot(s) its kind needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationPayload {
    /// A calendar event was created.
    NewEvent { event: EventSnapshot },
    /// A non-privileged user marked an event complete. Audience: privileged
    /// roles only, enforced at the view layer rather than at publish time.
    EventCompleted {
        event: EventSnapshot,
        completed_by: String,
    },
    /// Periodic summary of the user's pending (incomplete, future) events.
    EventReminder { events: Vec<EventSnapshot> },
    /// A product return was filed by the returns feature.
    ReturnCreated {
        #[serde(rename = "return")]
        retrn: ReturnSnapshot,
    },
}

impl NotificationPayload {
    /// The wire tag for this kind, e.g. `"new_event"`.
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationPayload::NewEvent { .. } => "new_event",
            NotificationPayload::EventCompleted { .. } => "event_completed",
            NotificationPayload::EventReminder { .. } => "event_reminder",
            NotificationPayload::ReturnCreated { .. } => "return_created",
        }
    }
}

/// A single user-visible alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationRecord {
    /// Millisecond-timestamp derived id, assigned at creation, never reused.
    /// Best-effort unique: two records created within the same millisecond
    /// can collide.
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(flatten)]
    pub payload: NotificationPayload,
    /// RFC 3339 creation time, immutable.
    pub timestamp: String,
    /// Mutable; only ever transitions `false -> true`.
    #[serde(default)]
    pub read: bool,
}

impl NotificationRecord {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        payload: NotificationPayload,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            title: title.into(),
            message: message.into(),
            payload,
            timestamp: now.to_rfc3339(),
            read: false,
        }
    }
}
