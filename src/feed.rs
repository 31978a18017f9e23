//! Role-filtered notification view.
//!
//! One feed per mounted view. `refresh` re-reads the store and recomputes the
//! visible list plus the unread badge count under the session's role;
//! mutation actions delegate to the store, signal other views, then refresh.

use std::sync::Arc;

use crate::broadcast::{ChangeNotifier, StoreChange};
use crate::errors::Result;
use crate::models::{NotificationPayload, NotificationRecord, SessionUser};
use crate::store::NotificationStore;

/// How many pending events a reminder summary lists before truncating.
const REMINDER_SUMMARY_LIMIT: usize = 3;

pub struct NotificationFeed {
    store: NotificationStore,
    notifier: Arc<dyn ChangeNotifier>,
    privileged: bool,
    items: Vec<NotificationRecord>,
    unread: usize,
}

impl NotificationFeed {
    /// Build a feed for `user` and perform the initial (mount-time) refresh.
    pub fn new(
        store: NotificationStore,
        notifier: Arc<dyn ChangeNotifier>,
        user: &SessionUser,
    ) -> Self {
        let mut feed = Self {
            store,
            notifier,
            privileged: user.is_privileged(),
            items: Vec::new(),
            unread: 0,
        };
        feed.refresh();
        feed
    }

    /// Re-read the store and recompute the visible list and unread count.
    /// Called on mount and on every broadcast signal, from either channel.
    pub fn refresh(&mut self) {
        let privileged = self.privileged;
        self.items = self
            .store
            .load()
            .into_iter()
            .filter(|r| visible_to(privileged, &r.payload))
            .collect();
        self.unread = self.items.iter().filter(|r| !r.read).count();
    }

    /// Visible records, newest first.
    pub fn items(&self) -> &[NotificationRecord] {
        &self.items
    }

    /// Unread badge count over visible records only: a non-privileged
    /// session's count excludes `event_completed` and `return_created` even
    /// when those records sit unread in the store.
    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn mark_as_read(&mut self, id: i64) -> Result<()> {
        self.store.mark_read(id)?;
        self.signal_and_refresh()
    }

    pub fn remove(&mut self, id: i64) -> Result<()> {
        self.store.remove(id)?;
        self.signal_and_refresh()
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.store.clear()?;
        self.signal_and_refresh()
    }

    fn signal_and_refresh(&mut self) -> Result<()> {
        self.notifier.publish(StoreChange::notifications());
        self.refresh();
        Ok(())
    }
}

fn visible_to(privileged: bool, payload: &NotificationPayload) -> bool {
    privileged
        || !matches!(
            payload,
            NotificationPayload::EventCompleted { .. } | NotificationPayload::ReturnCreated { .. }
        )
}

/// Display icon per notification kind.
pub fn icon(payload: &NotificationPayload) -> &'static str {
    match payload {
        NotificationPayload::NewEvent { .. } => "📅",
        NotificationPayload::EventCompleted { .. } => "✅",
        NotificationPayload::EventReminder { .. } => "⏰",
        NotificationPayload::ReturnCreated { .. } => "↩️",
    }
}

/// One-line summary for a record. Reminder payloads list the first 3 pending
/// events and collapse the rest into a `+N more` indicator.
pub fn summary(record: &NotificationRecord) -> String {
    match &record.payload {
        NotificationPayload::EventReminder { events } => {
            let shown: Vec<&str> = events
                .iter()
                .take(REMINDER_SUMMARY_LIMIT)
                .map(|e| e.title.as_str())
                .collect();
            let hidden = events.len().saturating_sub(REMINDER_SUMMARY_LIMIT);
            let mut line = shown.join(", ");
            if hidden > 0 {
                line.push_str(&format!(" +{hidden} more"));
            }
            line
        }
        _ => record.message.clone(),
    }
}
