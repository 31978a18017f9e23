use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::jobs::reminder::PendingEventSource;
use crate::models::EventSnapshot;

/// HTTP client for the GoStock backend, used by the reminder job to fetch a
/// user's calendar events. No retries: a failed poll is terminal for that
/// attempt and the next interval tick tries again.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("GoStock-Notify/1.0")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PendingEventSource for BackendClient {
    async fn events_for_user(&self, user_id: i64) -> anyhow::Result<Vec<EventSnapshot>> {
        let url = format!("{}/events", self.base_url);
        debug!(%url, user_id, "fetching events");

        let resp = self
            .client
            .get(&url)
            .query(&[("userId", user_id)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("backend returned {status} for {url}");
        }

        let events = resp.json::<Vec<EventSnapshot>>().await?;
        Ok(events)
    }
}
