//! Delivery transport boundary.
//!
//! The actual push/email/SMS service lives outside this system; everything
//! behind `DeliveryTransport` is an external collaborator. Two
//! implementations ship here: an HTTP push-gateway client and a log-only
//! fallback for deployments without a gateway configured.

use async_trait::async_trait;
use serde_json::json;

use herald_common::types::PushPayload;

use crate::error::NotifierError;

/// One delivery attempt to one recipient. Implementations must be safe to
/// call concurrently from many dispatch tasks.
#[async_trait]
pub trait DeliveryTransport: Send + Sync {
    async fn send(&self, recipient_id: i64, payload: &PushPayload) -> Result<(), NotifierError>;
}

/// HTTP client for a push relay (FCM-style gateway).
///
/// POSTs `{recipient_id, title, body}` to `<base_url>/send` with an
/// optional bearer key.
pub struct PushGatewayTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl PushGatewayTransport {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl DeliveryTransport for PushGatewayTransport {
    async fn send(&self, recipient_id: i64, payload: &PushPayload) -> Result<(), NotifierError> {
        let url = format!("{}/send", self.base_url.trim_end_matches('/'));

        let mut request = self.client.post(&url).json(&json!({
            "recipient_id": recipient_id,
            "title": payload.title,
            "body": payload.body,
        }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(NotifierError::Gateway(format!(
                "push gateway returned {} for recipient {}",
                response.status(),
                recipient_id
            )));
        }

        Ok(())
    }
}

/// Transport used when no push gateway is configured: records the attempt
/// in the log and reports success.
pub struct LogOnlyTransport;

#[async_trait]
impl DeliveryTransport for LogOnlyTransport {
    async fn send(&self, recipient_id: i64, payload: &PushPayload) -> Result<(), NotifierError> {
        tracing::debug!(
            recipient_id,
            title = %payload.title,
            "Push gateway not configured, delivery logged only"
        );
        Ok(())
    }
}
