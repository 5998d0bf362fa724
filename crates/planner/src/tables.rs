//! Reference tables for the prediction model.
//!
//! Every lookup is total. Channel ids outside the catalog resolve to the
//! `DEFAULT_*` ranges so an unrecognized channel still gets an estimate.

use mediamix_core::{AudienceTarget, CampaignGoal, CampaignType, ChannelKind};
use serde::Serialize;

/// Inclusive `[min, max]` range a base value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a unit sample in `[0, 1)` onto the range.
    pub fn at(&self, unit: f64) -> f64 {
        unit * (self.max - self.min) + self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const DEFAULT_CPM: Range = Range::new(5.0, 15.0);
pub const DEFAULT_CTR: Range = Range::new(0.001, 0.002);
pub const DEFAULT_CONVERSION: Range = Range::new(0.01, 0.02);

/// Base ROI is drawn as `unit * ROI_SPREAD + ROI_FLOOR`.
pub const ROI_FLOOR: f64 = 1.5;
pub const ROI_SPREAD: f64 = 3.0;

pub const AUTOMATION_BONUS: f64 = 1.2;
pub const DURATION_STEP: f64 = 0.1;
pub const DURATION_CAP: f64 = 1.5;

/// Base draw ranges for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelRates {
    pub cpm: Range,
    pub ctr: Range,
    pub conversion: Range,
}

impl ChannelRates {
    pub const DEFAULT: ChannelRates = ChannelRates {
        cpm: DEFAULT_CPM,
        ctr: DEFAULT_CTR,
        conversion: DEFAULT_CONVERSION,
    };
}

pub fn cpm_range(kind: ChannelKind) -> Range {
    match kind {
        ChannelKind::Search => Range::new(15.0, 40.0),
        ChannelKind::Social => Range::new(6.0, 14.0),
        ChannelKind::Display => Range::new(2.0, 8.0),
        ChannelKind::Video => Range::new(10.0, 25.0),
        ChannelKind::Ctv => Range::new(25.0, 45.0),
        ChannelKind::Tiktok => Range::new(4.0, 10.0),
        ChannelKind::Linkedin => Range::new(30.0, 60.0),
        ChannelKind::Programmatic => Range::new(3.0, 10.0),
        ChannelKind::Native => Range::new(5.0, 12.0),
        ChannelKind::Audio => Range::new(12.0, 25.0),
        ChannelKind::Dooh => Range::new(8.0, 20.0),
        ChannelKind::Influencer => Range::new(15.0, 35.0),
    }
}

pub fn ctr_range(kind: ChannelKind) -> Range {
    match kind {
        ChannelKind::Search => Range::new(0.02, 0.05),
        ChannelKind::Social => Range::new(0.008, 0.015),
        ChannelKind::Display => Range::new(0.001, 0.003),
        ChannelKind::Video => Range::new(0.004, 0.01),
        ChannelKind::Ctv => Range::new(0.002, 0.005),
        ChannelKind::Tiktok => Range::new(0.008, 0.02),
        ChannelKind::Linkedin => Range::new(0.004, 0.009),
        ChannelKind::Programmatic => Range::new(0.001, 0.004),
        ChannelKind::Native => Range::new(0.002, 0.006),
        ChannelKind::Audio => Range::new(0.001, 0.003),
        ChannelKind::Dooh => Range::new(0.0005, 0.0015),
        ChannelKind::Influencer => Range::new(0.01, 0.03),
    }
}

pub fn conversion_range(kind: ChannelKind) -> Range {
    match kind {
        ChannelKind::Search => Range::new(0.03, 0.06),
        ChannelKind::Social => Range::new(0.01, 0.025),
        ChannelKind::Display => Range::new(0.005, 0.012),
        ChannelKind::Video => Range::new(0.008, 0.018),
        ChannelKind::Ctv => Range::new(0.005, 0.01),
        ChannelKind::Tiktok => Range::new(0.008, 0.02),
        ChannelKind::Linkedin => Range::new(0.02, 0.045),
        ChannelKind::Programmatic => Range::new(0.006, 0.015),
        ChannelKind::Native => Range::new(0.01, 0.02),
        ChannelKind::Audio => Range::new(0.004, 0.01),
        ChannelKind::Dooh => Range::new(0.002, 0.006),
        ChannelKind::Influencer => Range::new(0.015, 0.035),
    }
}

/// Draw ranges for a channel id, falling back to the defaults.
pub fn channel_rates(channel_id: &str) -> ChannelRates {
    match ChannelKind::from_id(channel_id) {
        Some(kind) => ChannelRates {
            cpm: cpm_range(kind),
            ctr: ctr_range(kind),
            conversion: conversion_range(kind),
        },
        None => ChannelRates::DEFAULT,
    }
}

pub fn campaign_type_multiplier(campaign_type: CampaignType) -> f64 {
    match campaign_type {
        CampaignType::WebLanding => 1.0,
        CampaignType::MobileApp => 1.2,
        CampaignType::CrossPlatform => 1.4,
    }
}

pub fn audience_multiplier(target: AudienceTarget) -> f64 {
    match target {
        AudienceTarget::Broad => 0.8,
        AudienceTarget::Specific => 1.2,
        AudienceTarget::Custom => 1.5,
    }
}

pub fn automation_bonus(is_automated: bool) -> f64 {
    if is_automated {
        AUTOMATION_BONUS
    } else {
        1.0
    }
}

/// `min(1 + (months - 1) * 0.1, 1.5)`
pub fn duration_multiplier(duration_months: u32) -> f64 {
    let months = f64::from(duration_months.max(1));
    (1.0 + (months - 1.0) * DURATION_STEP).min(DURATION_CAP)
}

/// Multipliers a campaign goal applies on top of the channel draws.
///
/// Only `impressions`, `conversion`, `roi` and `ctr` feed the prediction; the
/// cost rows are kept as reference data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalAdjustment {
    pub impressions: f64,
    pub conversion: f64,
    pub roi: f64,
    pub cpm: f64,
    pub ctr: f64,
    pub cpc: f64,
    pub cac: f64,
}

pub fn goal_adjustment(goal: CampaignGoal) -> GoalAdjustment {
    match goal {
        CampaignGoal::Awareness => GoalAdjustment {
            impressions: 1.3,
            conversion: 0.7,
            roi: 0.9,
            cpm: 0.9,
            ctr: 0.8,
            cpc: 1.1,
            cac: 1.3,
        },
        CampaignGoal::Consideration => GoalAdjustment {
            impressions: 1.0,
            conversion: 1.0,
            roi: 1.0,
            cpm: 1.0,
            ctr: 1.2,
            cpc: 0.9,
            cac: 1.0,
        },
        CampaignGoal::Conversion => GoalAdjustment {
            impressions: 0.8,
            conversion: 1.4,
            roi: 1.3,
            cpm: 1.2,
            ctr: 1.1,
            cpc: 1.0,
            cac: 0.8,
        },
    }
}
