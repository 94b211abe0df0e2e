//! Client for the upstream event-management API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{Entries, Event, Guest};

use crate::config::Config;
use crate::error::TransportError;
use crate::runner::EventSource;

const EVENTS_PATH: &str = "/public/v1/event";
const GUESTS_PATH: &str = "/public/v1/event/get-guests";

/// Stateless request/response wrapper around the event API.
pub struct LumaClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl LumaClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.luma_api_base.clone(),
            api_key: config.luma_api_key.clone(),
        }
    }

    /// GET an endpoint that answers with the `{"entries": [...]}` envelope.
    async fn get_entries<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, TransportError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { url, status });
        }

        let envelope: Entries<T> = response
            .json()
            .await
            .map_err(|source| TransportError::Decode { url, source })?;

        Ok(envelope.entries)
    }
}

#[async_trait]
impl EventSource for LumaClient {
    async fn live_events(&self) -> Result<Vec<Event>, TransportError> {
        self.get_entries(EVENTS_PATH, &[("is_live", "true")]).await
    }

    async fn event_guests(&self, event_api_id: &str) -> Result<Vec<Guest>, TransportError> {
        // Approved guests only, sorted by check-in column.
        self.get_entries(
            GUESTS_PATH,
            &[
                ("event_api_id", event_api_id),
                ("approval_status", "approved"),
                ("sort_column", "checked_in_at"),
                ("sort_direction", "asc nulls last"),
            ],
        )
        .await
    }
}
