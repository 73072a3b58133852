//! HTTP client for the gift card balance upstream.

use crate::config::UpstreamSettings;
use crate::models::Card;
use crate::services::lookup::{CardLookup, LookupError, LookupResponse};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use service_core::observability::TracedRequestExt;
use std::time::Duration;

/// [`CardLookup`] backed by a JSON balance endpoint at
/// `{base_url}/card`.
#[derive(Clone)]
pub struct HttpCardLookup {
    client: Client,
    settings: UpstreamSettings,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    error: String,
}

impl HttpCardLookup {
    pub fn new(settings: UpstreamSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self { client, settings })
    }

    fn card_url(&self) -> String {
        format!("{}/card", self.settings.base_url.trim_end_matches('/'))
    }
}

/// Best available explanation for a non-2xx upstream answer.
fn rejection_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<UpstreamError>(body) {
        return parsed.error;
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("upstream lookup failed")
        .to_string()
}

#[async_trait]
impl CardLookup for HttpCardLookup {
    async fn get_card(
        &self,
        card_no: &str,
        pin: &str,
    ) -> Result<(Card, LookupResponse), LookupError> {
        let url = self.card_url();

        let response = self
            .client
            .post(&url)
            .with_trace_context()
            .json(&json!({ "card_no": card_no, "pin": pin }))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Card lookup request failed");
                LookupError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(status = %status, error = %e, "Failed to read card lookup response");
            LookupError::Transport(e.to_string())
        })?;
        let meta = LookupResponse::new(status);

        tracing::debug!(status = %status, "Card lookup response received");

        if !status.is_success() {
            return Err(LookupError::Rejected {
                message: rejection_message(status, &body),
                response: meta,
            });
        }

        let card = serde_json::from_str::<Card>(&body).map_err(|e| {
            tracing::error!(error = %e, "Card lookup returned an unreadable card");
            LookupError::InvalidPayload {
                message: format!("unreadable card data: {}", e),
                response: meta,
            }
        })?;

        Ok((card, meta))
    }
}
