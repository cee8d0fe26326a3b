//! REST client for the hosted guest table

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use super::GuestStore;
use crate::config::BackendConfig;
use crate::error::{GuestError, Result};
use crate::guests::{GuestRecord, GuestUpdate};

/// Postgres error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Error body returned by the REST layer
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// [`GuestStore`] backed by the hosted database's REST endpoint
#[derive(Debug, Clone)]
pub struct RestGuestStore {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl RestGuestStore {
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: &BackendConfig) -> Self {
        let endpoint = format!(
            "{}/rest/v1/{}",
            config.url.trim_end_matches('/'),
            config.guests_table
        );
        Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| GuestError::Persistence(format!("request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }

    async fn read_rows(response: Response) -> Result<Vec<GuestRecord>> {
        response
            .json::<Vec<GuestRecord>>()
            .await
            .map_err(|e| GuestError::Persistence(format!("unexpected response body: {}", e)))
    }
}

/// Map a non-success response to the matching error kind
fn error_from_response(status: StatusCode, body: &str) -> GuestError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();

    let mut message = parsed
        .message
        .unwrap_or_else(|| if body.is_empty() { status.to_string() } else { body.to_string() });
    if let Some(details) = parsed.details {
        message = format!("{} ({})", message, details);
    }

    if status == StatusCode::CONFLICT || parsed.code.as_deref() == Some(UNIQUE_VIOLATION) {
        GuestError::Duplicate(message)
    } else {
        GuestError::Persistence(format!("{}: {}", status, message))
    }
}

#[async_trait]
impl GuestStore for RestGuestStore {
    async fn list_guests(&self, event_id: Uuid) -> Result<Vec<GuestRecord>> {
        let request = self.request(Method::GET).query(&[
            ("select", "*".to_string()),
            ("event_id", format!("eq.{}", event_id)),
            ("order", "created_at.asc".to_string()),
        ]);

        let response = self.send(request).await?;
        let guests = Self::read_rows(response).await?;
        log::debug!("Fetched {} guests for event {}", guests.len(), event_id);
        Ok(guests)
    }

    async fn bulk_insert(&self, records: &[GuestRecord]) -> Result<Vec<GuestRecord>> {
        let request = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(records);

        let response = self.send(request).await?;
        Self::read_rows(response).await
    }

    async fn update_guest(&self, id: Uuid, update: &GuestUpdate) -> Result<GuestRecord> {
        let request = self
            .request(Method::PATCH)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(update);

        let response = self.send(request).await?;
        Self::read_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GuestError::Persistence(format!("guest {} not found", id)))
    }

    async fn delete_guest(&self, id: Uuid) -> Result<()> {
        let request = self
            .request(Method::DELETE)
            .query(&[("id", format!("eq.{}", id))]);

        self.send(request).await?;
        Ok(())
    }
}
