//! Even budget split across selected channels.

use mediamix_core::{CampaignGoal, CampaignSettings, Channel, MediaMixEntry, MediaMixResult};
use rand::Rng;
use tracing::debug;

use crate::predictor::{predict_channel_metrics, validate_inputs};

/// Split `budget` evenly across `channel_ids` and predict each channel.
///
/// Order follows `channel_ids`; duplicates are kept. An empty selection
/// yields an empty mix.
pub fn build_media_mix<S, R>(
    channel_ids: &[S],
    budget: f64,
    goal: CampaignGoal,
    settings: &CampaignSettings,
    rng: &mut R,
) -> MediaMixResult<Vec<MediaMixEntry>>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    if channel_ids.is_empty() {
        return Ok(Vec::new());
    }
    validate_inputs(budget, settings)?;

    let allocation = 100.0 / channel_ids.len() as f64;
    let channel_budget = budget * allocation / 100.0;

    let mut mix = Vec::with_capacity(channel_ids.len());
    for id in channel_ids {
        let id = id.as_ref();
        let predictions = predict_channel_metrics(id, goal, channel_budget, settings, rng)?;
        debug!(
            channel = id,
            allocation,
            budget = channel_budget,
            impressions = predictions.impressions,
            roi = predictions.roi,
            "Predicted channel"
        );
        mix.push(MediaMixEntry {
            channel: Channel::from_id(id),
            allocation,
            budget: channel_budget,
            predictions,
        });
    }

    Ok(mix)
}
