//! In-memory session store for calculated plans.

use dashmap::DashMap;
use mediamix_core::{MediaMixError, MediaMixResult};
use tracing::debug;
use uuid::Uuid;

use crate::planner::MediaPlan;

/// Concurrent plan store backed by `DashMap`. Plans live for the session only.
pub struct PlanStore {
    plans: DashMap<Uuid, MediaPlan>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self {
            plans: DashMap::new(),
        }
    }

    pub fn save(&self, plan: MediaPlan) -> Uuid {
        let id = plan.id;
        self.plans.insert(id, plan);
        debug!(plan_id = %id, stored = self.plans.len(), "Plan saved");
        id
    }

    pub fn get(&self, id: &Uuid) -> MediaMixResult<MediaPlan> {
        self.plans
            .get(id)
            .map(|p| p.clone())
            .ok_or_else(|| MediaMixError::PlanNotFound(id.to_string()))
    }

    /// The most recently created plan.
    pub fn latest(&self) -> Option<MediaPlan> {
        self.plans
            .iter()
            .max_by_key(|p| p.created_at)
            .map(|p| p.clone())
    }

    /// All plans, newest first.
    pub fn list(&self) -> Vec<MediaPlan> {
        let mut plans: Vec<MediaPlan> = self.plans.iter().map(|p| p.clone()).collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        plans
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.plans.remove(id).is_some()
    }

    pub fn clear(&self) {
        self.plans.clear();
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for PlanStore {
    fn default() -> Self {
        Self::new()
    }
}
