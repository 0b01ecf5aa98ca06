//! View state machines consumed by frontends.
//!
//! Each view is headless: it owns draft state and transitions, and the
//! rendering layer only reads accessors and forwards events. Nothing in
//! here performs I/O; network effects happen through the
//! [`VoteBackend`](crate::backend::VoteBackend) seam driven by the view
//! hosts.

pub mod channel_search;
pub mod community_form;
pub mod poll_form;
pub mod submit;

pub use channel_search::{ChannelSearchView, SearchPhase, SearchRequest};
pub use community_form::CommunityFormView;
pub use poll_form::PollFormView;
pub use submit::{SubmitBlocked, SubmitPhase};
