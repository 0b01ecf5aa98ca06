//! # Votecast App
//!
//! Portable headless application core for the Votecast front-end: the
//! poll and community creation workflows of a Farcaster voting service.
//!
//! Frontends (terminal, web, mobile bindings) own rendering and event
//! plumbing; everything below the surface lives here:
//!
//! - [`session`]: process-wide authentication state, gating every
//!   creation workflow behind sign-in.
//! - [`fields`]: bounded, stable-identity row lists backing repeatable
//!   inputs.
//! - [`validation`]: declarative per-field rules producing one message
//!   per violating field.
//! - [`views`]: the form state machines, including the debounced
//!   channel search with last-request-wins resolution and the
//!   validate/submit/created flow.
//! - [`backend`]: the client seam to the voting service, with a
//!   `reqwest` implementation.
//!
//! All state is local to one user's view instance; the only shared
//! object is the session provider. State machines are synchronous and
//! runtime-agnostic, so hosts decide how network completions are
//! scheduled back onto them.

pub mod backend;
pub mod config;
pub mod fields;
pub mod session;
pub mod validation;
pub mod views;

pub use backend::{BackendError, HttpBackend, VoteBackend};
pub use config::AppConfig;
pub use fields::{FieldList, RowId};
pub use session::{
    LogoutRequest, Session, SessionObserver, SessionProvider, SessionView, SubscriptionId,
};
pub use validation::{FieldValue, Rule, ValidationErrors, Validator};
pub use views::{
    ChannelSearchView, CommunityFormView, PollFormView, SearchPhase, SearchRequest, SubmitBlocked,
    SubmitPhase,
};
