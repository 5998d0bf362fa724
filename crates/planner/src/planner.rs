//! Plan orchestration: request validation, mix building and insights.

use chrono::{DateTime, Utc};
use mediamix_core::config::CalculatorConfig;
use mediamix_core::{
    CampaignGoal, CampaignSettings, MediaMixEntry, MediaMixError, MediaMixResult,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::allocation::build_media_mix;
use crate::insights::{insights, Insight};
use crate::predictor::validate_inputs;

/// Inputs for one calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRequest {
    pub channel_ids: Vec<String>,
    pub budget: f64,
    pub goal: CampaignGoal,
    pub settings: CampaignSettings,
}

/// A calculated media plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaPlan {
    pub id: Uuid,
    pub request: PlanRequest,
    pub entries: Vec<MediaMixEntry>,
    pub insights: Vec<Insight>,
    pub created_at: DateTime<Utc>,
}

impl MediaPlan {
    pub fn insight_messages(&self) -> Vec<String> {
        self.insights.iter().map(|i| i.message.clone()).collect()
    }
}

pub struct MediaMixPlanner {
    config: CalculatorConfig,
}

impl MediaMixPlanner {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Check a request against the engine preconditions and the configured
    /// limits before anything is drawn.
    pub fn validate(&self, request: &PlanRequest) -> MediaMixResult<()> {
        if request.channel_ids.is_empty() {
            return Err(MediaMixError::EmptySelection);
        }
        if request.channel_ids.len() > self.config.max_channels {
            return Err(MediaMixError::InvalidArgument(format!(
                "at most {} channels may be selected, got {}",
                self.config.max_channels,
                request.channel_ids.len()
            )));
        }
        validate_inputs(request.budget, &request.settings)?;

        let duration = request.settings.duration_months;
        if !self.config.allowed_durations.is_empty()
            && !self.config.allowed_durations.contains(&duration)
        {
            return Err(MediaMixError::InvalidArgument(format!(
                "duration of {duration} months is not one of {:?}",
                self.config.allowed_durations
            )));
        }

        let per_channel = request.budget / request.channel_ids.len() as f64;
        if per_channel < self.config.min_channel_budget {
            return Err(MediaMixError::InvalidArgument(format!(
                "per-channel budget {per_channel:.2} is below the minimum of {:.2}",
                self.config.min_channel_budget
            )));
        }
        Ok(())
    }

    /// Build a plan drawing from the supplied RNG.
    pub fn plan_with_rng<R: Rng + ?Sized>(
        &self,
        request: PlanRequest,
        rng: &mut R,
    ) -> MediaMixResult<MediaPlan> {
        if let Err(e) = self.validate(&request) {
            warn!(error = %e, "Rejected plan request");
            return Err(e);
        }

        let entries = build_media_mix(
            &request.channel_ids,
            request.budget,
            request.goal,
            &request.settings,
            rng,
        )?;
        let insights = insights(&entries);

        let plan = MediaPlan {
            id: Uuid::new_v4(),
            request,
            entries,
            insights,
            created_at: Utc::now(),
        };

        info!(
            plan_id = %plan.id,
            channels = plan.entries.len(),
            budget = plan.request.budget,
            goal = %plan.request.goal,
            "Media plan calculated"
        );
        Ok(plan)
    }

    /// Build a plan with the thread-local RNG after yielding to the runtime
    /// once, so a caller on a busy executor stays responsive.
    pub async fn plan(&self, request: PlanRequest) -> MediaMixResult<MediaPlan> {
        tokio::task::yield_now().await;
        self.plan_with_rng(request, &mut rand::thread_rng())
    }
}

impl Default for MediaMixPlanner {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn request(ids: &[&str], budget: f64) -> PlanRequest {
        PlanRequest {
            channel_ids: ids.iter().map(|s| s.to_string()).collect(),
            budget,
            goal: CampaignGoal::Awareness,
            settings: CampaignSettings::default(),
        }
    }

    #[test]
    fn test_plan_builds_entries_and_insights() {
        let planner = MediaMixPlanner::default();
        let plan = planner
            .plan_with_rng(request(&["search", "social"], 4000.0), &mut StepRng::new(0, 0))
            .unwrap();
        assert_eq!(plan.entries.len(), 2);
        assert_eq!(plan.insights.len(), 3);
        assert_eq!(plan.request.budget, 4000.0);
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let planner = MediaMixPlanner::default();
        let err = planner
            .plan_with_rng(request(&[], 4000.0), &mut StepRng::new(0, 0))
            .unwrap_err();
        assert!(matches!(err, MediaMixError::EmptySelection));
    }

    #[test]
    fn test_duration_outside_allowed_steps_is_rejected() {
        let planner = MediaMixPlanner::default();
        let mut req = request(&["search"], 1000.0);
        req.settings.duration_months = 2;
        assert!(planner.validate(&req).is_err());

        let open = MediaMixPlanner::new(CalculatorConfig {
            allowed_durations: vec![],
            ..CalculatorConfig::default()
        });
        assert!(open.validate(&req).is_ok());
    }

    #[test]
    fn test_min_channel_budget() {
        let planner = MediaMixPlanner::new(CalculatorConfig {
            min_channel_budget: 100.0,
            ..CalculatorConfig::default()
        });
        assert!(planner.validate(&request(&["search", "ctv"], 150.0)).is_err());
        assert!(planner.validate(&request(&["search", "ctv"], 200.0)).is_ok());
    }

    #[test]
    fn test_too_many_channels() {
        let planner = MediaMixPlanner::new(CalculatorConfig {
            max_channels: 1,
            ..CalculatorConfig::default()
        });
        assert!(planner.validate(&request(&["search", "ctv"], 1000.0)).is_err());
    }

    #[tokio::test]
    async fn test_async_plan() {
        let planner = MediaMixPlanner::default();
        let plan = planner
            .plan(request(&["ctv", "tiktok", "dooh"], 9000.0))
            .await
            .unwrap();
        assert_eq!(plan.entries.len(), 3);
        let total: f64 = plan.entries.iter().map(|e| e.budget).sum();
        assert!((total - 9000.0).abs() < 1e-6);
    }
}
