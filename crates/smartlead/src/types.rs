//! Wire types owned by the Smartlead integration.

use outreach_core::types::CampaignId;
use serde::{Deserialize, Serialize};

/// Status value that pauses a campaign.
pub const STATUS_PAUSED: &str = "PAUSED";

/// Status value that starts (or resumes) a campaign.
pub const STATUS_START: &str = "START";

/// Create-campaign response. Only the assigned id matters to callers; the
/// rest of the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedCampaign {
    pub id: CampaignId,
}

/// Ingest settings attached to every add-leads call. These flags are fixed;
/// they are never derived from the inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadIngestSettings {
    pub ignore_global_block_list: bool,
    pub ignore_unsubscribe_list: bool,
    pub ignore_duplicate_leads_in_other_campaign: bool,
}

impl LeadIngestSettings {
    pub const fn fixed() -> Self {
        Self {
            ignore_global_block_list: true,
            ignore_unsubscribe_list: true,
            ignore_duplicate_leads_in_other_campaign: false,
        }
    }
}

impl Default for LeadIngestSettings {
    fn default() -> Self {
        Self::fixed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ingest_settings_wire_shape() {
        let encoded = serde_json::to_value(LeadIngestSettings::fixed()).unwrap();
        assert_eq!(
            encoded,
            json!({
                "ignore_global_block_list": true,
                "ignore_unsubscribe_list": true,
                "ignore_duplicate_leads_in_other_campaign": false,
            })
        );
    }

    #[test]
    fn test_created_campaign_ignores_extra_fields() {
        let created: CreatedCampaign =
            serde_json::from_value(json!({"ok": true, "id": 42, "name": "Cold Email Campaign"}))
                .unwrap();
        assert_eq!(created.id, CampaignId(42));
    }
}
