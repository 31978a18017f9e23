//! Per-kind notification construction for the producer flows.
//!
//! Each producer (event creation, event completion, the reminder job, the
//! returns feature) goes through one method here: build the record, append it
//! to the store, then signal subscribed views. Publish only happens after the
//! producer's own backend call has already succeeded; a failed producer
//! action never synthesizes a notification.

use std::sync::Arc;

use tracing::debug;

use crate::broadcast::{ChangeNotifier, StoreChange};
use crate::errors::Result;
use crate::models::{EventSnapshot, NotificationPayload, NotificationRecord, ReturnSnapshot, SessionUser};
use crate::store::NotificationStore;

pub struct NotificationPublisher {
    store: NotificationStore,
    notifier: Arc<dyn ChangeNotifier>,
}

impl NotificationPublisher {
    pub fn new(store: NotificationStore, notifier: Arc<dyn ChangeNotifier>) -> Self {
        Self { store, notifier }
    }

    /// A calendar event was created. Skipped entirely when the user has
    /// notifications disabled.
    pub fn event_created(&self, user: &SessionUser, event: EventSnapshot) -> Result<()> {
        if !user.notifications_enabled {
            debug!(user_id = user.id, "notifications disabled, skipping new_event publish");
            return Ok(());
        }
        let record = NotificationRecord::new(
            "New event",
            format!("\"{}\" was added to the agenda", event.title),
            NotificationPayload::NewEvent { event },
        );
        self.append_and_signal(record)
    }

    /// A non-privileged user marked an event complete. The record is stored
    /// unconditionally; only privileged views render it.
    ///
    /// This is also the merge path for reminders: the completed event is
    /// pruned out of every stored `event_reminder` payload, and reminders
    /// left empty are dropped. The scheduler's own publish path does no such
    /// merging.
    pub fn event_completed(&self, event: EventSnapshot, completed_by: &str) -> Result<()> {
        let event_id = event.id;
        let record = NotificationRecord::new(
            "Event completed",
            format!("\"{}\" was completed by {}", event.title, completed_by),
            NotificationPayload::EventCompleted {
                event,
                completed_by: completed_by.to_string(),
            },
        );
        self.store.append(record)?;
        self.prune_completed_from_reminders(event_id)?;
        self.notifier.publish(StoreChange::notifications());
        Ok(())
    }

    /// One reminder summarizing the user's pending events. Appends a fresh
    /// record every time; reminders accumulate across scheduler ticks.
    pub fn event_reminder(&self, events: Vec<EventSnapshot>) -> Result<()> {
        let count = events.len();
        let record = NotificationRecord::new(
            "Upcoming events",
            if count == 1 {
                "You have 1 upcoming event".to_string()
            } else {
                format!("You have {count} upcoming events")
            },
            NotificationPayload::EventReminder { events },
        );
        self.append_and_signal(record)
    }

    /// A product return was filed (called by the returns feature).
    pub fn return_created(&self, retrn: ReturnSnapshot) -> Result<()> {
        let record = NotificationRecord::new(
            "Return created",
            format!(
                "{}x \"{}\" returned by {}: {}",
                retrn.quantity, retrn.product_name, retrn.requested_by, retrn.reason
            ),
            NotificationPayload::ReturnCreated { retrn },
        );
        self.append_and_signal(record)
    }

    fn append_and_signal(&self, record: NotificationRecord) -> Result<()> {
        debug!(id = record.id, kind = record.payload.kind(), "publishing notification");
        self.store.append(record)?;
        self.notifier.publish(StoreChange::notifications());
        Ok(())
    }

    fn prune_completed_from_reminders(&self, event_id: i64) -> Result<()> {
        let mut records = self.store.load();
        let before = records.len();
        for record in records.iter_mut() {
            if let NotificationPayload::EventReminder { events } = &mut record.payload {
                events.retain(|e| e.id != event_id);
            }
        }
        records.retain(|r| {
            !matches!(&r.payload, NotificationPayload::EventReminder { events } if events.is_empty())
        });
        if records.len() != before {
            debug!(event_id, "dropped emptied reminder notification(s)");
        }
        self.store.replace_all(records)
    }
}
