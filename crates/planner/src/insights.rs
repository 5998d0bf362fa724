//! Rule-based recommendations over a computed media mix.

use std::cmp::Ordering;
use std::fmt;

use mediamix_core::MediaMixEntry;
use serde::{Deserialize, Serialize};

/// ROI multiplier below which a channel is flagged for reallocation.
pub const MIN_EFFICIENT_ROI: f64 = 2.0;
/// CAC above which a channel is flagged for targeting review.
pub const MAX_EFFICIENT_CAC: u64 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    HighestRoi,
    ReallocateBudget,
    AllChannelsEfficient,
    OptimizeCac,
    EfficientCac,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn roi_percent(roi: f64) -> f64 {
    roi * 100.0
}

/// Evaluate the three insight rules in order: best ROI, ROI efficiency,
/// CAC efficiency. An empty mix yields no insights.
pub fn insights(mix: &[MediaMixEntry]) -> Vec<Insight> {
    let mut ranked: Vec<&MediaMixEntry> = mix.iter().collect();
    // Stable, so ties keep selection order.
    ranked.sort_by(|a, b| {
        b.predictions
            .roi
            .partial_cmp(&a.predictions.roi)
            .unwrap_or(Ordering::Equal)
    });

    let Some(best) = ranked.first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(3);
    out.push(Insight::new(
        InsightKind::HighestRoi,
        format!(
            "{} shows the highest ROI potential at {:.0}%. Consider increasing its budget share.",
            best.name(),
            roi_percent(best.predictions.roi)
        ),
    ));

    match mix.iter().find(|e| e.predictions.roi < MIN_EFFICIENT_ROI) {
        Some(weak) => out.push(Insight::new(
            InsightKind::ReallocateBudget,
            format!(
                "Consider reallocating budget from {} (ROI {:.0}%) to higher-performing channels.",
                weak.name(),
                roi_percent(weak.predictions.roi)
            ),
        )),
        None => out.push(Insight::new(
            InsightKind::AllChannelsEfficient,
            "All selected channels show efficient ROI above 200%.".to_string(),
        )),
    }

    match mix.iter().find(|e| e.predictions.cac > MAX_EFFICIENT_CAC) {
        Some(costly) => out.push(Insight::new(
            InsightKind::OptimizeCac,
            format!(
                "Optimize {} targeting to bring its ${} customer acquisition cost down.",
                costly.name(),
                costly.predictions.cac
            ),
        )),
        None => out.push(Insight::new(
            InsightKind::EfficientCac,
            "Customer acquisition costs are efficient across all channels.".to_string(),
        )),
    }

    out
}

/// Insight messages in display order, at most three.
pub fn top_insights(mix: &[MediaMixEntry]) -> Vec<String> {
    insights(mix).into_iter().map(|i| i.message).collect()
}
