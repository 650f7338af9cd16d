//! Domain types shared by the proxy and the Smartlead client.
//!
//! Everything here is transient: constructed for one request, dropped when
//! the response goes out. Upstream owns all durable state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Campaign name used when the inbound request does not carry one.
pub const DEFAULT_CAMPAIGN_NAME: &str = "Cold Email Campaign";

/// Identifier of a campaign as assigned by the upstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignId(pub i64);

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a lead within a campaign, assigned by the upstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub i64);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Client reference accepted on campaign creation. Upstream accepts either
/// a numeric id or a string; absent means `null` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Numeric(i64),
    Named(String),
}

/// A contact record targeted by a campaign. Opaque to this system: no field
/// is validated or transformed, the value is forwarded verbatim.
pub type LeadRecord = serde_json::Value;

/// Inbound payload for the combined create-campaign-with-leads operation.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub leads: Vec<LeadRecord>,
}
