//! Event reminder polling job.
//!
//! Every 15 minutes (and once immediately on startup) this task:
//! 1. Fetches the current user's calendar events from the backend API.
//! 2. Keeps the pending ones: not completed, dated strictly in the future.
//! 3. Publishes a single `event_reminder` notification summarizing them.
//!
//! Privileged users never receive reminders. A failing or malformed event
//! source is treated as an empty set; staleness up to one interval is
//! accepted. Reminders published on successive ticks accumulate; the only
//! de-duplication lives in the event-completion path.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, warn};

use crate::models::{EventSnapshot, SessionUser};
use crate::publisher::NotificationPublisher;

/// Default poll cadence.
pub const REMINDER_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Where pending-event candidates come from (the backend REST API in
/// production, a stub in tests).
#[async_trait]
pub trait PendingEventSource: Send + Sync {
    async fn events_for_user(&self, user_id: i64) -> anyhow::Result<Vec<EventSnapshot>>;
}

pub struct ReminderScheduler {
    source: Arc<dyn PendingEventSource>,
    publisher: Arc<NotificationPublisher>,
    user: SessionUser,
    interval: Duration,
}

impl ReminderScheduler {
    pub fn new(
        source: Arc<dyn PendingEventSource>,
        publisher: Arc<NotificationPublisher>,
        user: SessionUser,
    ) -> Self {
        Self {
            source,
            publisher,
            user,
            interval: REMINDER_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Spawn the polling loop. The first tick fires immediately. Abort the
    /// returned handle on teardown to clear the timer.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = time::interval(self.interval);
            loop {
                interval.tick().await;
                if let Err(e) = self.run_once().await {
                    tracing::error!(error = %e, "reminder check failed");
                }
            }
        })
    }

    /// One reminder check. Public so the daemon and tests can drive ticks
    /// directly.
    pub async fn run_once(&self) -> anyhow::Result<()> {
        if self.user.is_privileged() {
            debug!(user_id = self.user.id, "privileged user, skipping reminder check");
            return Ok(());
        }

        let events = match self.source.events_for_user(self.user.id).await {
            Ok(events) => events,
            Err(e) => {
                warn!(user_id = self.user.id, error = %e, "event source unavailable, treating as empty");
                Vec::new()
            }
        };

        let now = Utc::now();
        let pending: Vec<EventSnapshot> =
            events.into_iter().filter(|e| e.is_pending(now)).collect();

        if pending.is_empty() {
            debug!(user_id = self.user.id, "no pending events, no reminder");
            return Ok(());
        }

        debug!(
            user_id = self.user.id,
            count = pending.len(),
            "publishing event reminder"
        );
        self.publisher.event_reminder(pending)?;
        Ok(())
    }
}
