//! Shared types, configuration and errors for the media mix calculator.

pub mod channels;
pub mod config;
pub mod error;
pub mod types;

pub use channels::{catalog, Channel, ChannelKind};
pub use config::AppConfig;
pub use error::{MediaMixError, MediaMixResult};
pub use types::{
    AudienceTarget, CampaignGoal, CampaignSettings, CampaignType, MediaMixEntry, PredictionBundle,
};
