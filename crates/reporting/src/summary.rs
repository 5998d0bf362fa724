//! Aggregate figures for a media mix.

use mediamix_core::MediaMixEntry;
use serde::{Deserialize, Serialize};

/// Totals and unweighted means across the channels of one mix.
///
/// Cost and rate figures are simple means over channels, not weighted by
/// budget.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MixSummary {
    pub channels: usize,
    pub total_budget: f64,
    pub total_allocation: f64,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub total_conversions: u64,
    pub avg_roi: f64,
    pub avg_cpm: f64,
    pub avg_ctr: f64,
    pub avg_cpc: f64,
    pub avg_cac: f64,
}

impl MixSummary {
    /// Summarize a mix. An empty mix yields all zeros.
    pub fn from_mix(mix: &[MediaMixEntry]) -> Self {
        if mix.is_empty() {
            return Self::default();
        }
        let n = mix.len() as f64;
        let mean = |f: fn(&MediaMixEntry) -> f64| mix.iter().map(f).sum::<f64>() / n;

        Self {
            channels: mix.len(),
            total_budget: mix.iter().map(|e| e.budget).sum(),
            total_allocation: mix.iter().map(|e| e.allocation).sum(),
            total_impressions: saturating_total(mix, |e| e.predictions.impressions),
            total_clicks: saturating_total(mix, |e| e.predictions.clicks),
            total_conversions: saturating_total(mix, |e| e.predictions.conversions),
            avg_roi: mean(|e| e.predictions.roi),
            avg_cpm: mean(|e| e.predictions.cpm),
            avg_ctr: mean(|e| e.predictions.ctr),
            avg_cpc: mean(|e| e.predictions.cpc),
            avg_cac: mean(|e| e.predictions.cac as f64),
        }
    }
}

fn saturating_total(mix: &[MediaMixEntry], f: fn(&MediaMixEntry) -> u64) -> u64 {
    mix.iter().map(f).fold(0u64, u64::saturating_add)
}
