//! Shared submission phase machine.
//!
//! Both creation forms drive the same four-state machine:
//! `Idle → Submitting → Succeeded | Failed`. `Failed` re-enables the
//! form with values intact; `Succeeded` is terminal and the draft stops
//! being editable.

/// Submission lifecycle of one form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    /// Nothing submitted yet; the form is editable.
    #[default]
    Idle,
    /// A single submission is in flight; repeated triggers are no-ops.
    Submitting,
    /// The service accepted the draft. Terminal: no path back to editing.
    Succeeded {
        /// Identifier returned by the service, trimmed of trailing
        /// newlines.
        id: String,
    },
    /// The service (or transport) rejected the attempt. The form stays
    /// editable with all values retained.
    Failed {
        /// Message shown in the failure banner.
        message: String,
    },
}

impl SubmitPhase {
    /// Whether a submission is currently in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Identifier of the created resource, once succeeded.
    #[must_use]
    pub fn succeeded_id(&self) -> Option<&str> {
        match self {
            Self::Succeeded { id } => Some(id),
            _ => None,
        }
    }

    /// Failure banner text, dismissed on the next submit attempt.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Why a submit trigger did not start a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    /// A submission is already in flight.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    /// The draft was already submitted successfully.
    #[error("this draft has already been submitted")]
    AlreadyCreated,
    /// No authenticated session.
    #[error("sign in to submit")]
    SignedOut,
    /// The draft has validation errors; no network call was made.
    #[error("the draft has validation errors")]
    Invalid,
}

/// Strip the trailing newline a plain-text identifier response carries.
pub(crate) fn normalize_id(raw: &str) -> &str {
    raw.trim_end_matches(['\r', '\n'])
}
