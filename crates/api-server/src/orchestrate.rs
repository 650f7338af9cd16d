//! Two-step campaign creation: create the campaign upstream, then attach
//! the leads to the id the create call returned.
//!
//! The sequence is not transactional. A campaign that was created before
//! the add-leads call failed stays created; there is no compensating
//! delete upstream. The two failure variants keep that distinction
//! visible to callers.

use outreach_core::types::{CampaignId, CampaignRequest, DEFAULT_CAMPAIGN_NAME};
use outreach_smartlead::{SmartleadClient, SmartleadError};
use thiserror::Error;
use tracing::{debug, info};

/// Successful outcome: both upstream calls completed.
#[derive(Debug, Clone)]
pub struct CampaignCreated {
    pub campaign_id: CampaignId,
    pub message: String,
}

/// Terminal failure states of one orchestration invocation.
#[derive(Error, Debug)]
pub enum OrchestrationError {
    /// The create call failed; no campaign exists and the add-leads call
    /// was never attempted.
    #[error("campaign creation failed: {0}")]
    Create(#[source] SmartleadError),

    /// The campaign was created but the leads could not be attached.
    /// Partial success: the campaign exists upstream without its leads.
    #[error("leads could not be added to campaign {campaign_id}: {source}")]
    AddLeads {
        campaign_id: CampaignId,
        #[source]
        source: SmartleadError,
    },
}

impl OrchestrationError {
    /// Upstream-reported status for the step that failed, if any.
    pub fn status(&self) -> Option<u16> {
        self.source_error().status()
    }

    /// Upstream's own error message for the step that failed, if any.
    pub fn upstream_message(&self) -> Option<&str> {
        self.source_error().upstream_message()
    }

    /// Id of the campaign that exists upstream despite the failure.
    pub fn created_campaign_id(&self) -> Option<CampaignId> {
        match self {
            Self::Create(_) => None,
            Self::AddLeads { campaign_id, .. } => Some(*campaign_id),
        }
    }

    fn source_error(&self) -> &SmartleadError {
        match self {
            Self::Create(source) => source,
            Self::AddLeads { source, .. } => source,
        }
    }
}

/// Create a campaign and attach the request's leads to it.
///
/// The add-leads endpoint is parameterized by the id the create call
/// returns, so the two calls are strictly sequential; there is nothing to
/// run concurrently within one invocation.
pub async fn create_campaign_with_leads(
    client: &SmartleadClient,
    request: CampaignRequest,
) -> Result<CampaignCreated, OrchestrationError> {
    info!(payload = ?request, "Received campaign creation request");

    let name = request.name.as_deref().unwrap_or(DEFAULT_CAMPAIGN_NAME);

    let created = client
        .create_campaign(name, request.client_id.as_ref())
        .await
        .map_err(OrchestrationError::Create)?;
    let campaign_id = created.id;

    info!(campaign_id = %campaign_id, "Campaign created");

    let ingest = client
        .add_leads(campaign_id, &request.leads)
        .await
        .map_err(|source| OrchestrationError::AddLeads {
            campaign_id,
            source,
        })?;

    debug!(campaign_id = %campaign_id, response = %ingest, "Leads added to campaign");

    Ok(CampaignCreated {
        campaign_id,
        message: format!(
            "Campaign created with ID {campaign_id} and leads added successfully."
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use outreach_core::config::SmartleadConfig;
    use outreach_core::types::ClientId;
    use serde_json::json;

    fn test_client(base_url: &str) -> SmartleadClient {
        SmartleadClient::new(&SmartleadConfig {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn request(value: serde_json::Value) -> CampaignRequest {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_add_leads() {
        let mut server = Server::new_async().await;

        let create = server
            .mock("POST", "/campaigns/create")
            .match_body(Matcher::Json(json!({
                "name": "Q3 Outreach",
                "client_id": "acme",
            })))
            .with_status(200)
            .with_body(r#"{"ok":true,"id":42}"#)
            .create_async()
            .await;
        let add_leads = server
            .mock("POST", "/campaigns/42/leads")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let outcome = create_campaign_with_leads(
            &client,
            request(json!({
                "name": "Q3 Outreach",
                "client_id": "acme",
                "leads": [{"email": "a@b.com"}],
            })),
        )
        .await
        .unwrap();

        create.assert_async().await;
        add_leads.assert_async().await;
        assert_eq!(outcome.campaign_id, CampaignId(42));
        assert!(outcome.message.contains("42"));
    }

    #[tokio::test]
    async fn test_defaults_applied_to_create_body() {
        let mut server = Server::new_async().await;

        // Absent name becomes the default; absent client_id becomes null.
        let create = server
            .mock("POST", "/campaigns/create")
            .match_body(Matcher::Json(json!({
                "name": "Cold Email Campaign",
                "client_id": null,
            })))
            .with_status(200)
            .with_body(r#"{"ok":true,"id":5}"#)
            .create_async()
            .await;
        let add_leads = server
            .mock("POST", "/campaigns/5/leads")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let outcome = create_campaign_with_leads(
            &client,
            request(json!({"leads": [{"email": "a@b.com"}]})),
        )
        .await
        .unwrap();

        create.assert_async().await;
        add_leads.assert_async().await;
        assert_eq!(outcome.campaign_id, CampaignId(5));
    }

    #[tokio::test]
    async fn test_create_failure_never_reaches_add_leads() {
        let mut server = Server::new_async().await;

        let create = server
            .mock("POST", "/campaigns/create")
            .with_status(402)
            .with_body(r#"{"error":"Plan limit reached"}"#)
            .create_async()
            .await;
        let add_leads = server
            .mock("POST", Matcher::Regex(r"^/campaigns/\d+/leads$".to_string()))
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = create_campaign_with_leads(
            &client,
            request(json!({"leads": [{"email": "a@b.com"}]})),
        )
        .await
        .unwrap_err();

        create.assert_async().await;
        add_leads.assert_async().await;
        assert!(matches!(err, OrchestrationError::Create(_)));
        assert_eq!(err.status(), Some(402));
        assert_eq!(err.upstream_message(), Some("Plan limit reached"));
        assert_eq!(err.created_campaign_id(), None);
    }

    #[tokio::test]
    async fn test_add_leads_failure_is_partial_success() {
        let mut server = Server::new_async().await;

        let create = server
            .mock("POST", "/campaigns/create")
            .with_status(200)
            .with_body(r#"{"ok":true,"id":42}"#)
            .create_async()
            .await;
        let add_leads = server
            .mock("POST", "/campaigns/42/leads")
            .with_status(500)
            .with_body(r#"{"error":"Lead ingest unavailable"}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = create_campaign_with_leads(
            &client,
            request(json!({"leads": [{"email": "a@b.com"}]})),
        )
        .await
        .unwrap_err();

        // The campaign was created upstream and stays created.
        create.assert_async().await;
        add_leads.assert_async().await;
        assert!(matches!(err, OrchestrationError::AddLeads { .. }));
        assert_eq!(err.created_campaign_id(), Some(CampaignId(42)));
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.upstream_message(), Some("Lead ingest unavailable"));
    }

    #[tokio::test]
    async fn test_create_network_fault_has_no_status() {
        let client = test_client("http://127.0.0.1:9");
        let err = create_campaign_with_leads(
            &client,
            request(json!({"leads": []})),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, OrchestrationError::Create(_)));
        assert_eq!(err.status(), None);
        assert_eq!(err.upstream_message(), None);
    }

    #[tokio::test]
    async fn test_leads_forwarded_verbatim() {
        let mut server = Server::new_async().await;

        let lead = json!({
            "email": "a@b.com",
            "first_name": "Ada",
            "custom_fields": {"segment": "smb"},
        });

        let create = server
            .mock("POST", "/campaigns/create")
            .with_status(200)
            .with_body(r#"{"ok":true,"id":42}"#)
            .create_async()
            .await;
        let add_leads = server
            .mock("POST", "/campaigns/42/leads")
            .match_body(Matcher::PartialJson(json!({"lead_list": [lead.clone()]})))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = test_client(&server.url());
        let explicit_client = ClientId::Numeric(3);
        create_campaign_with_leads(
            &client,
            CampaignRequest {
                name: Some("Verbatim".to_string()),
                client_id: Some(explicit_client),
                leads: vec![lead],
            },
        )
        .await
        .unwrap();

        create.assert_async().await;
        add_leads.assert_async().await;
    }
}
