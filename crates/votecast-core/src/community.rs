//! Community records and census gating.
//!
//! A community is a curated voter group. Its census type decides who is
//! eligible: token holders, NFT holders, or members of a Farcaster
//! channel. Eligibility verification itself is delegated to the external
//! census service and never happens client-side.

use crate::channel::Channel;
use serde::{Deserialize, Serialize};

/// Eligibility rule deciding who may vote in a community's polls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CensusType {
    /// Holders of an ERC-20 token.
    #[default]
    Erc20,
    /// Holders of an NFT collection.
    Nft,
    /// Members of a Farcaster channel.
    Channel,
}

impl CensusType {
    /// All census types, in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Erc20, Self::Nft, Self::Channel]
    }

    /// Display label for the census type.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Erc20 => "ERC-20 token",
            Self::Nft => "NFT collection",
            Self::Channel => "Channel membership",
        }
    }

    /// Whether this census is anchored on contract addresses.
    #[must_use]
    pub fn uses_addresses(self) -> bool {
        matches!(self, Self::Erc20 | Self::Nft)
    }

    /// Whether this census is anchored on channel membership.
    #[must_use]
    pub fn uses_channels(self) -> bool {
        matches!(self, Self::Channel)
    }
}

/// A token or NFT contract address anchoring a census.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusAddress {
    /// Contract address.
    pub address: String,
    /// Chain the contract lives on (e.g. "ethereum", "base").
    pub blockchain: String,
}

/// Community summary as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// Community id number.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Logo image URL.
    #[serde(rename = "logoURL", default)]
    pub logo_url: String,
    /// Group chat URL, if the community has one.
    #[serde(rename = "groupChat", default)]
    pub group_chat_url: String,
    /// Eligibility rule for the community's polls.
    #[serde(rename = "censusType", default)]
    pub census_type: Option<CensusType>,
    /// Addresses anchoring a token census.
    #[serde(rename = "censusAddresses", default)]
    pub census_addresses: Vec<CensusAddress>,
    /// Channel anchoring a channel census.
    #[serde(rename = "censusChannel", default)]
    pub census_channel: Option<Channel>,
    /// Whether the community has been disabled by its admins.
    #[serde(default)]
    pub disabled: bool,
}
