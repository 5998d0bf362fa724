//! Advertising channel catalog.
//!
//! The catalog is a fixed set of twelve paid-media channels. Channel ids are
//! plain strings on the wire, so ids outside the catalog are still accepted
//! and carried through with generic display metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MediaMixError;

/// The channels the calculator knows reference data for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Search,
    Social,
    Display,
    Video,
    Ctv,
    Tiktok,
    Linkedin,
    Programmatic,
    Native,
    Audio,
    Dooh,
    Influencer,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 12] = [
        ChannelKind::Search,
        ChannelKind::Social,
        ChannelKind::Display,
        ChannelKind::Video,
        ChannelKind::Ctv,
        ChannelKind::Tiktok,
        ChannelKind::Linkedin,
        ChannelKind::Programmatic,
        ChannelKind::Native,
        ChannelKind::Audio,
        ChannelKind::Dooh,
        ChannelKind::Influencer,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ChannelKind::Search => "search",
            ChannelKind::Social => "social",
            ChannelKind::Display => "display",
            ChannelKind::Video => "video",
            ChannelKind::Ctv => "ctv",
            ChannelKind::Tiktok => "tiktok",
            ChannelKind::Linkedin => "linkedin",
            ChannelKind::Programmatic => "programmatic",
            ChannelKind::Native => "native",
            ChannelKind::Audio => "audio",
            ChannelKind::Dooh => "dooh",
            ChannelKind::Influencer => "influencer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ChannelKind::Search => "Search Ads",
            ChannelKind::Social => "Social Media",
            ChannelKind::Display => "Display Network",
            ChannelKind::Video => "Online Video",
            ChannelKind::Ctv => "Connected TV",
            ChannelKind::Tiktok => "TikTok",
            ChannelKind::Linkedin => "LinkedIn",
            ChannelKind::Programmatic => "Programmatic",
            ChannelKind::Native => "Native Ads",
            ChannelKind::Audio => "Streaming Audio",
            ChannelKind::Dooh => "Digital Out-of-Home",
            ChannelKind::Influencer => "Influencer Marketing",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChannelKind::Search => "Intent-driven text ads on search engine result pages",
            ChannelKind::Social => "Feed and story placements across major social networks",
            ChannelKind::Display => "Banner inventory across publisher networks",
            ChannelKind::Video => "Pre-roll and in-stream video on web and apps",
            ChannelKind::Ctv => "Ads on smart TVs and streaming devices",
            ChannelKind::Tiktok => "Short-form vertical video for younger audiences",
            ChannelKind::Linkedin => "Professional targeting by role, industry and company",
            ChannelKind::Programmatic => "Automated open-exchange buying with real-time bidding",
            ChannelKind::Native => "Sponsored content matching the publisher's look and feel",
            ChannelKind::Audio => "Spots in music streaming and podcasts",
            ChannelKind::Dooh => "Digital screens in public and retail spaces",
            ChannelKind::Influencer => "Sponsored content from creators and their communities",
        }
    }

    /// Resolve a channel id. Returns `None` for ids outside the catalog.
    pub fn from_id(id: &str) -> Option<Self> {
        let needle = id.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|k| k.id() == needle)
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChannelKind {
    type Err = MediaMixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| MediaMixError::UnknownVariant {
            kind: "channel",
            value: s.to_string(),
        })
    }
}

/// One advertising channel with its display metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Channel {
    /// Build a channel for any id. Catalog ids get their display metadata,
    /// anything else uses the id as its name.
    pub fn from_id(id: &str) -> Self {
        match ChannelKind::from_id(id) {
            Some(kind) => Self::from(kind),
            None => Self {
                id: id.to_string(),
                name: id.to_string(),
                description: String::new(),
            },
        }
    }

    pub fn kind(&self) -> Option<ChannelKind> {
        ChannelKind::from_id(&self.id)
    }
}

impl From<ChannelKind> for Channel {
    fn from(kind: ChannelKind) -> Self {
        Self {
            id: kind.id().to_string(),
            name: kind.display_name().to_string(),
            description: kind.description().to_string(),
        }
    }
}

/// The full channel catalog in display order.
pub fn catalog() -> Vec<Channel> {
    ChannelKind::ALL.into_iter().map(Channel::from).collect()
}
