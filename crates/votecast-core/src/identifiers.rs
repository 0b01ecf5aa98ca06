//! Stable string identifiers issued by external services.
//!
//! Both identifiers are opaque to the client: the poll id is whatever the
//! voting service returns from a creation request, and the channel id is
//! the Farcaster channel slug.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a created poll, as returned by the voting service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollId(String);

impl PollId {
    /// Wrap a raw identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a Farcaster channel (the channel slug).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    /// Wrap a raw channel slug.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw slug text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
