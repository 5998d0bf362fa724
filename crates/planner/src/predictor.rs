//! Per-channel metric prediction.
//!
//! Base values are drawn uniformly from the channel's reference ranges and
//! then scaled by the goal adjustment row and the campaign settings. Draws
//! come from the caller's RNG, so two calls with identical inputs usually
//! disagree; tests pass a fixed generator.

use mediamix_core::{
    CampaignGoal, CampaignSettings, MediaMixError, MediaMixResult, PredictionBundle,
};
use rand::Rng;
use tracing::trace;

use crate::tables::{self, ROI_FLOOR, ROI_SPREAD};

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Largest total budget accepted. Keeps impression counts well inside `u64`
/// for every channel and settings combination.
pub const MAX_BUDGET: f64 = 1e12;

/// Reject inputs the model cannot produce a meaningful estimate for.
pub fn validate_inputs(budget: f64, settings: &CampaignSettings) -> MediaMixResult<()> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(MediaMixError::InvalidArgument(format!(
            "budget must be a positive amount, got {budget}"
        )));
    }
    if budget > MAX_BUDGET {
        return Err(MediaMixError::InvalidArgument(format!(
            "budget must not exceed {MAX_BUDGET}, got {budget}"
        )));
    }
    if settings.duration_months == 0 {
        return Err(MediaMixError::InvalidArgument(
            "duration must be at least one month".into(),
        ));
    }
    Ok(())
}

/// Predict campaign metrics for one channel.
///
/// `budget` is the amount allocated to this channel. Unknown channel ids
/// use the default reference ranges.
///
/// When impressions or clicks round to zero the matching cost metric
/// (`cpm` or `cpc`) is `f64::INFINITY`. CAC is guarded and reported as 0
/// when nothing converts.
pub fn predict_channel_metrics<R: Rng + ?Sized>(
    channel_id: &str,
    goal: CampaignGoal,
    budget: f64,
    settings: &CampaignSettings,
    rng: &mut R,
) -> MediaMixResult<PredictionBundle> {
    validate_inputs(budget, settings)?;

    let rates = tables::channel_rates(channel_id);

    let base_cpm = rates.cpm.at(rng.gen::<f64>());
    let base_impressions = (budget / base_cpm * 1000.0).round();
    let base_ctr = rates.ctr.at(rng.gen::<f64>());
    let base_conversion = rates.conversion.at(rng.gen::<f64>());
    let base_roi = round_to(rng.gen::<f64>() * ROI_SPREAD + ROI_FLOOR, 1);

    trace!(
        channel = channel_id,
        base_cpm,
        base_impressions,
        base_ctr,
        base_conversion,
        base_roi,
        base_clicks = (base_impressions * base_ctr).round(),
        "Drew base channel metrics"
    );

    let type_multiplier = tables::campaign_type_multiplier(settings.campaign_type);
    let audience = tables::audience_multiplier(settings.audience_target);
    let automation = tables::automation_bonus(settings.is_automated);
    let duration = tables::duration_multiplier(settings.duration_months);
    let adj = tables::goal_adjustment(goal);

    let impressions =
        (base_impressions * adj.impressions * type_multiplier * audience * duration).round();
    let cpm = (budget / impressions * 1000.0).round();
    let ctr = round_to(base_ctr * adj.ctr * audience * automation, 4);
    let clicks = (impressions * ctr).round();
    let conversion = round_to(base_conversion * adj.conversion * audience * automation, 4);
    let conversions = (clicks * conversion).round();
    let cpc = round_to(budget / clicks, 2);
    let cac = if conversions > 0.0 {
        (budget / conversions).round() as u64
    } else {
        0
    };
    let roi = round_to(
        base_roi * adj.roi * type_multiplier * audience * automation * duration,
        1,
    );

    Ok(PredictionBundle {
        impressions: impressions as u64,
        cpm,
        roi,
        ctr,
        cpc,
        conversion,
        cac,
        clicks: clicks as u64,
        conversions: conversions as u64,
        engagement: 0,
    })
}
