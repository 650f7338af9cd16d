//! HTTP communication with the Smartlead campaign service.

use crate::error::{SmartleadError, SmartleadResult};
use crate::types::{CreatedCampaign, LeadIngestSettings};
use outreach_core::config::SmartleadConfig;
use outreach_core::types::{CampaignId, ClientId, LeadId, LeadRecord};
use serde_json::{json, Value};
use std::time::Duration;

/// Client for the upstream campaign API. Cheap to share behind an `Arc`;
/// holds no per-request state.
pub struct SmartleadClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SmartleadClient {
    /// Create a new client from configuration.
    pub fn new(config: &SmartleadConfig) -> SmartleadResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SmartleadError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Create a campaign. Returns the upstream-assigned id.
    pub async fn create_campaign(
        &self,
        name: &str,
        client_id: Option<&ClientId>,
    ) -> SmartleadResult<CreatedCampaign> {
        let body = json!({
            "name": name,
            "client_id": client_id,
        });
        let response = self.post("/campaigns/create", Some(&body)).await?;
        serde_json::from_value(response).map_err(|e| SmartleadError::Decode(e.to_string()))
    }

    /// Add leads to an existing campaign. Lead records are forwarded
    /// verbatim; the ingest settings are the fixed constant.
    pub async fn add_leads(
        &self,
        campaign_id: CampaignId,
        leads: &[LeadRecord],
    ) -> SmartleadResult<Value> {
        let body = json!({
            "lead_list": leads,
            "settings": LeadIngestSettings::fixed(),
        });
        self.post(&format!("/campaigns/{campaign_id}/leads"), Some(&body))
            .await
    }

    /// Set a campaign's status. `status` is forwarded as-is; values other
    /// than [`crate::types::STATUS_PAUSED`] and [`crate::types::STATUS_START`]
    /// are upstream's to accept or reject.
    pub async fn set_campaign_status(
        &self,
        campaign_id: CampaignId,
        status: &str,
    ) -> SmartleadResult<Value> {
        let body = json!({ "status": status });
        self.post(&format!("/campaigns/{campaign_id}/status"), Some(&body))
            .await
    }

    /// List all leads attached to a campaign.
    pub async fn list_leads(&self, campaign_id: CampaignId) -> SmartleadResult<Value> {
        self.get(&format!("/campaigns/{campaign_id}/leads")).await
    }

    /// Pause a single lead within a campaign.
    pub async fn pause_lead(
        &self,
        campaign_id: CampaignId,
        lead_id: LeadId,
    ) -> SmartleadResult<Value> {
        self.post(
            &format!("/campaigns/{campaign_id}/leads/{lead_id}/pause"),
            None,
        )
        .await
    }

    /// Resume a single lead within a campaign.
    pub async fn resume_lead(
        &self,
        campaign_id: CampaignId,
        lead_id: LeadId,
    ) -> SmartleadResult<Value> {
        self.post(
            &format!("/campaigns/{campaign_id}/leads/{lead_id}/resume"),
            None,
        )
        .await
    }

    // The api_key rides in the query string, so full URLs must never reach
    // logs or error text. Diagnostics carry the path only.
    fn url(&self, path: &str) -> String {
        format!("{}{}?api_key={}", self.base_url, path, self.api_key)
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> SmartleadResult<Value> {
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.dispatch(path, request).await
    }

    async fn get(&self, path: &str) -> SmartleadResult<Value> {
        let request = self.http.get(self.url(path));
        self.dispatch(path, request).await
    }

    async fn dispatch(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> SmartleadResult<Value> {
        tracing::debug!(path = %path, "Calling Smartlead");

        let response = request.send().await.map_err(|e| {
            let e = e.without_url();
            let err = if e.is_timeout() {
                SmartleadError::Network(format!("request timed out: {e}"))
            } else {
                SmartleadError::Network(e.to_string())
            };
            tracing::error!(path = %path, error = %err, "Smartlead request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string));
            tracing::error!(
                path = %path,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "Smartlead rejected request"
            );
            return Err(SmartleadError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SmartleadError::Network(e.without_url().to_string()))?;

        // Some operations answer 2xx with an empty body.
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            let err = SmartleadError::Decode(e.to_string());
            tracing::error!(path = %path, error = %err, "Smartlead response could not be decoded");
            err
        })
    }
}
