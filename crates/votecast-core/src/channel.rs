//! Farcaster channel records and selectable options.

use crate::identifiers::ChannelId;
use serde::{Deserialize, Serialize};

/// A Farcaster channel as returned by the channel search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel slug.
    pub id: ChannelId,
    /// Display name.
    pub name: String,
    /// Channel description text.
    #[serde(default)]
    pub description: String,
    /// Number of accounts following the channel.
    #[serde(rename = "followerCount", default)]
    pub followers: u64,
    /// Channel image URL.
    #[serde(rename = "image", default)]
    pub image_url: String,
    /// Canonical channel URL.
    #[serde(default)]
    pub url: String,
}

/// A channel entry as shown in (and picked from) a multi-select.
///
/// Produced only by mapping a [`Channel`] out of a lookup response, and
/// immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOption {
    /// Channel slug, used as the selection value.
    pub id: ChannelId,
    /// Display label (the channel name).
    pub label: String,
    /// Channel image URL.
    pub image_url: String,
}

impl From<Channel> for ChannelOption {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id,
            label: channel.name,
            image_url: channel.image_url,
        }
    }
}
