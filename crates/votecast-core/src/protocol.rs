//! Wire contract with the voting service.
//!
//! Request bodies are JSON. The poll creation endpoint answers with the
//! raw poll identifier as plain text (possibly newline-terminated); list
//! endpoints answer with JSON envelopes.

use crate::channel::Channel;
use crate::community::{CensusAddress, CensusType};
use crate::identifiers::ChannelId;
use crate::profile::FarcasterProfile;
use serde::{Deserialize, Serialize};

/// Body of `POST {base}/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePollRequest {
    /// Profile of the creating user, as issued by the identity provider.
    pub profile: FarcasterProfile,
    /// The poll question.
    pub question: String,
    /// Voting window in hours.
    ///
    /// Omitted entirely when the user left the field empty; the service
    /// applies its own default. Never zero, null, or NaN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Choice texts, in row order.
    pub options: Vec<String>,
}

/// Envelope of `GET {base}/channels?q={query}` responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// Channels matching the query.
    #[serde(default)]
    pub channels: Vec<Channel>,
}

/// Body of `POST {base}/communities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommunityRequest {
    /// Community display name.
    pub name: String,
    /// Eligibility rule for the community's polls.
    #[serde(rename = "censusType")]
    pub census_type: CensusType,
    /// Addresses anchoring a token census. Empty for channel censuses.
    #[serde(rename = "censusAddresses", default, skip_serializing_if = "Vec::is_empty")]
    pub census_addresses: Vec<CensusAddress>,
    /// Channels anchoring a channel census. Empty for token censuses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<ChannelId>,
    /// Group chat URL, when provided.
    #[serde(rename = "groupChat", default, skip_serializing_if = "Option::is_none")]
    pub group_chat_url: Option<String>,
}
