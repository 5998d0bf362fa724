//! Campaign inputs and prediction outputs shared by the planner and exporters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::channels::Channel;
use crate::error::MediaMixError;

// ─── Campaign Inputs ────────────────────────────────────────────────────────

/// What the campaign optimizes for. Selects a goal adjustment row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CampaignGoal {
    Awareness,
    Consideration,
    Conversion,
}

impl CampaignGoal {
    pub const ALL: [CampaignGoal; 3] = [
        CampaignGoal::Awareness,
        CampaignGoal::Consideration,
        CampaignGoal::Conversion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignGoal::Awareness => "awareness",
            CampaignGoal::Consideration => "consideration",
            CampaignGoal::Conversion => "conversion",
        }
    }
}

/// Where the campaign lands users.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    WebLanding,
    MobileApp,
    CrossPlatform,
}

impl CampaignType {
    pub const ALL: [CampaignType; 3] = [
        CampaignType::WebLanding,
        CampaignType::MobileApp,
        CampaignType::CrossPlatform,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::WebLanding => "web_landing",
            CampaignType::MobileApp => "mobile_app",
            CampaignType::CrossPlatform => "cross_platform",
        }
    }
}

/// How narrowly the campaign is targeted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AudienceTarget {
    Broad,
    Specific,
    Custom,
}

impl AudienceTarget {
    pub const ALL: [AudienceTarget; 3] = [
        AudienceTarget::Broad,
        AudienceTarget::Specific,
        AudienceTarget::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudienceTarget::Broad => "broad",
            AudienceTarget::Specific => "specific",
            AudienceTarget::Custom => "custom",
        }
    }
}

macro_rules! impl_variant_text {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = MediaMixError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_ascii_lowercase().replace('-', "_");
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| MediaMixError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_variant_text!(CampaignGoal, "campaign goal");
impl_variant_text!(CampaignType, "campaign type");
impl_variant_text!(AudienceTarget, "audience target");

/// Settings fixed for the duration of one calculation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CampaignSettings {
    pub campaign_type: CampaignType,
    pub audience_target: AudienceTarget,
    /// Campaign length in months. Must be at least 1.
    pub duration_months: u32,
    pub is_automated: bool,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            campaign_type: CampaignType::WebLanding,
            audience_target: AudienceTarget::Broad,
            duration_months: 1,
            is_automated: false,
        }
    }
}

// ─── Prediction Outputs ─────────────────────────────────────────────────────

/// Predicted metrics for one channel. Derived per calculation, never persisted.
///
/// `cpm` and `cpc` are infinite when impressions or clicks round to zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictionBundle {
    pub impressions: u64,
    /// Whole currency units per thousand impressions.
    #[serde(deserialize_with = "infinite_if_null")]
    pub cpm: f64,
    /// Return multiplier, `2.4` means 240%.
    pub roi: f64,
    /// Click-through rate as a fraction.
    pub ctr: f64,
    #[serde(deserialize_with = "infinite_if_null")]
    pub cpc: f64,
    /// Conversion rate as a fraction (not a count).
    pub conversion: f64,
    /// Whole currency units per acquisition, 0 when nothing converts.
    pub cac: u64,
    pub clicks: u64,
    pub conversions: u64,
    /// Never populated.
    pub engagement: u64,
}

/// serde_json writes non-finite floats as `null`.
fn infinite_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

/// A channel merged with its share of the budget and its predictions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaMixEntry {
    #[serde(flatten)]
    pub channel: Channel,
    /// Percent of the total budget.
    pub allocation: f64,
    pub budget: f64,
    pub predictions: PredictionBundle,
}

impl MediaMixEntry {
    pub fn id(&self) -> &str {
        &self.channel.id
    }

    pub fn name(&self) -> &str {
        &self.channel.name
    }
}
