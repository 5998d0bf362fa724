//! Media mix prediction engine: reference tables, per-channel prediction,
//! even budget allocation, rule-based insights and an in-memory plan store.

pub mod allocation;
pub mod insights;
pub mod planner;
pub mod predictor;
pub mod store;
pub mod tables;

pub use allocation::build_media_mix;
pub use insights::{insights, top_insights, Insight, InsightKind};
pub use planner::{MediaMixPlanner, MediaPlan, PlanRequest};
pub use predictor::{predict_channel_metrics, MAX_BUDGET};
pub use store::PlanStore;
