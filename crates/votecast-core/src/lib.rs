//! # Votecast Core
//!
//! Pure domain and wire types shared by every Votecast consumer:
//! identifiers, the Farcaster profile, channel and community records,
//! census gating, the creation-request contract, and the error taxonomy.
//!
//! This crate is intentionally free of I/O, async, and mutable state.
//! The application core (`votecast-app`) builds its view state machines
//! on top of these types; frontends import both.

pub mod channel;
pub mod community;
pub mod errors;
pub mod identifiers;
pub mod limits;
pub mod profile;
pub mod protocol;

pub use channel::{Channel, ChannelOption};
pub use community::{CensusAddress, CensusType, Community};
pub use errors::ErrorCategory;
pub use identifiers::{ChannelId, PollId};
pub use profile::FarcasterProfile;
pub use protocol::{ChannelListResponse, CreateCommunityRequest, CreatePollRequest};
