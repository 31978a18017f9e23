use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time copy of a calendar event, embedded in notification payloads.
///
/// This is a snapshot, not a live reference: if the backend later deletes or
/// edits the event, the embedded copy stays as it was at publish time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    pub id: i64,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock time, `HH:MM`.
    pub time: String,
    #[serde(default)]
    pub completed: bool,
    pub user_id: i64,
}

impl EventSnapshot {
    /// The moment this event occurs, if its date/time fields parse.
    pub fn occurs_at(&self) -> Option<DateTime<Utc>> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        Utc.from_local_datetime(&date.and_time(time)).single()
    }

    /// An event is pending while it is not completed and still in the future.
    /// Unparseable date/time fields count as not pending.
    pub fn is_pending(&self, now: DateTime<Utc>) -> bool {
        if self.completed {
            return false;
        }
        match self.occurs_at() {
            Some(at) => at > now,
            None => false,
        }
    }
}

/// Snapshot of a product return, embedded in `return_created` payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSnapshot {
    pub product_name: String,
    pub quantity: u32,
    pub reason: String,
    pub requested_by: String,
}
