//! Poll creation form.
//!
//! Owns the draft (question, choices, optional duration, selected
//! channels), the submission phase machine, and the current validation
//! errors. The flow is validate → build payload → submit →
//! succeeded/failed; validation failures never reach the network.

use crate::backend::{BackendError, VoteBackend};
use crate::config::AppConfig;
use crate::fields::{FieldList, RowId};
use crate::session::Session;
use crate::validation::{FieldValue, Rule, ValidationErrors, Validator};
use crate::views::channel_search::ChannelSearchView;
use crate::views::submit::{normalize_id, SubmitBlocked, SubmitPhase};
use votecast_core::{limits, CreatePollRequest, PollId};

/// Headless state of the poll creation form.
pub struct PollFormView {
    question: String,
    choices: FieldList<String>,
    duration_hours: Option<u32>,
    channel_search: ChannelSearchView,
    phase: SubmitPhase,
    errors: ValidationErrors,
}

impl PollFormView {
    /// Create an empty draft: two blank choices, no duration, nothing
    /// selected.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            question: String::new(),
            choices: FieldList::new(limits::MIN_CHOICES, limits::MAX_CHOICES),
            duration_hours: None,
            channel_search: ChannelSearchView::new(config.search_debounce_ms),
            phase: SubmitPhase::Idle,
            errors: ValidationErrors::default(),
        }
    }

    // =========================================================================
    // Draft Access & Editing
    // =========================================================================

    /// Whether the draft accepts edits. False while submitting and
    /// permanently false once created.
    #[must_use]
    pub fn editable(&self) -> bool {
        matches!(self.phase, SubmitPhase::Idle | SubmitPhase::Failed { .. })
    }

    /// The question text.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Set the question text. No-op when the draft is not editable.
    pub fn set_question(&mut self, text: impl Into<String>) {
        if self.editable() {
            self.question = text.into();
        }
    }

    /// The choice rows.
    #[must_use]
    pub fn choices(&self) -> &FieldList<String> {
        &self.choices
    }

    /// Add a blank choice row. `None` at the maximum of four or when
    /// the draft is not editable.
    pub fn add_choice(&mut self) -> Option<RowId> {
        if !self.editable() {
            return None;
        }
        self.choices.append(String::new())
    }

    /// Remove a choice row. No-op at the minimum of two.
    pub fn remove_choice(&mut self, id: RowId) -> bool {
        self.editable() && self.choices.remove(id)
    }

    /// Replace a choice row's text.
    pub fn set_choice(&mut self, id: RowId, text: impl Into<String>) -> bool {
        if !self.editable() {
            return false;
        }
        let text = text.into();
        self.choices.update(id, |row| *row = text)
    }

    /// The voting window, in hours, when one was entered.
    #[must_use]
    pub fn duration_hours(&self) -> Option<u32> {
        self.duration_hours
    }

    /// Set the voting window directly.
    pub fn set_duration_hours(&mut self, hours: Option<u32>) {
        if self.editable() {
            self.duration_hours = hours;
        }
    }

    /// Set the voting window from raw field input.
    ///
    /// Blank input clears the field (the service applies its own
    /// default; the client never substitutes one). Returns `false` and
    /// leaves the value unchanged for non-numeric input, so the field
    /// can never hold a value that would serialize badly.
    pub fn set_duration_input(&mut self, raw: &str) -> bool {
        if !self.editable() {
            return false;
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.duration_hours = None;
            return true;
        }
        match trimmed.parse::<u32>() {
            Ok(hours) => {
                self.duration_hours = Some(hours);
                true
            }
            Err(_) => false,
        }
    }

    /// The embedded channel multi-select.
    #[must_use]
    pub fn channel_search(&self) -> &ChannelSearchView {
        &self.channel_search
    }

    /// Mutable access to the embedded channel multi-select.
    pub fn channel_search_mut(&mut self) -> &mut ChannelSearchView {
        &mut self.channel_search
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Run one validation pass over the current draft.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut validator = Validator::new();
        validator.check(
            "question",
            FieldValue::Text(&self.question),
            &[Rule::Required, Rule::MaxLength(limits::MAX_QUESTION_LEN)],
        );
        for (index, text) in self.choices.values().enumerate() {
            // Only the first two choices are required; the rest are
            // optional but still length-bounded.
            let rules: &[Rule] = if index < limits::MIN_CHOICES {
                &[Rule::Required, Rule::MaxLength(limits::MAX_CHOICE_LEN)]
            } else {
                &[Rule::MaxLength(limits::MAX_CHOICE_LEN)]
            };
            validator.check(&format!("choices[{index}]"), FieldValue::Text(text), rules);
        }
        validator.check(
            "duration",
            FieldValue::Number(self.duration_hours.map(i64::from)),
            &[Rule::NumericRange {
                min: limits::MIN_DURATION_HOURS,
                max: limits::MAX_DURATION_HOURS,
            }],
        );
        validator.finish()
    }

    /// Errors from the last submit attempt.
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Current submission phase.
    #[must_use]
    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    /// Failure banner from the last attempt, if any.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.phase.banner()
    }

    /// Identifier of the created poll, once succeeded.
    #[must_use]
    pub fn poll_id(&self) -> Option<PollId> {
        self.phase.succeeded_id().map(PollId::new)
    }

    /// Start a submission: gate on session and phase, validate, and
    /// build the wire payload.
    ///
    /// On success the phase is `Submitting` (repeat triggers are
    /// rejected until [`complete_submit`] runs) and any prior failure
    /// banner is dismissed. On a validation failure every violating
    /// field's message is set at once and no payload exists for the
    /// caller to send.
    ///
    /// [`complete_submit`]: PollFormView::complete_submit
    pub fn begin_submit(&mut self, session: &Session) -> Result<CreatePollRequest, SubmitBlocked> {
        match self.phase {
            SubmitPhase::Submitting => return Err(SubmitBlocked::SubmissionInFlight),
            SubmitPhase::Succeeded { .. } => return Err(SubmitBlocked::AlreadyCreated),
            SubmitPhase::Idle | SubmitPhase::Failed { .. } => {}
        }
        let Some(profile) = session.profile() else {
            return Err(SubmitBlocked::SignedOut);
        };

        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return Err(SubmitBlocked::Invalid);
        }
        self.errors = ValidationErrors::default();
        self.phase = SubmitPhase::Submitting;

        Ok(CreatePollRequest {
            profile: profile.clone(),
            question: self.question.clone(),
            duration: self.duration_hours,
            options: self
                .choices
                .values()
                .filter(|text| !text.trim().is_empty())
                .cloned()
                .collect(),
        })
    }

    /// Record the outcome of the in-flight submission.
    ///
    /// Success trims the trailing newline from the returned identifier
    /// and permanently replaces the editable draft with the created
    /// state. Failure keeps every field value and re-enables
    /// submission.
    pub fn complete_submit(&mut self, outcome: Result<String, BackendError>) {
        if !self.phase.is_submitting() {
            tracing::debug!("ignoring completion with no submission in flight");
            return;
        }
        match outcome {
            Ok(raw) => {
                let id = normalize_id(&raw);
                tracing::info!(poll_id = id, "poll created");
                self.phase = SubmitPhase::Succeeded { id: id.to_string() };
            }
            Err(error) => {
                tracing::warn!(%error, "poll creation failed");
                self.phase = SubmitPhase::Failed {
                    message: error.user_message(),
                };
            }
        }
    }

    /// Drive a full submission against a backend.
    ///
    /// Returns the blocking reason without touching the network when
    /// the attempt cannot start; otherwise the outcome lands in
    /// [`phase`](PollFormView::phase).
    pub async fn submit(
        &mut self,
        session: &Session,
        backend: &dyn VoteBackend,
    ) -> Result<(), SubmitBlocked> {
        let request = self.begin_submit(session)?;
        let outcome = backend.create_poll(&request).await;
        self.complete_submit(outcome);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votecast_core::FarcasterProfile;

    fn form() -> PollFormView {
        PollFormView::new(&AppConfig::default())
    }

    fn session() -> Session {
        Session::authenticated(FarcasterProfile {
            fid: 7,
            username: "alice".into(),
            ..Default::default()
        })
    }

    fn fill_valid(form: &mut PollFormView) {
        form.set_question("Best L2?");
        let ids: Vec<_> = form.choices().row_ids().collect();
        form.set_choice(ids[0], "base");
        form.set_choice(ids[1], "optimism");
    }

    #[test]
    fn test_empty_question_blocks_with_required_error() {
        let mut form = form();
        let ids: Vec<_> = form.choices().row_ids().collect();
        form.set_choice(ids[0], "a");
        form.set_choice(ids[1], "b");

        assert_eq!(form.begin_submit(&session()), Err(SubmitBlocked::Invalid));
        assert_eq!(form.errors().get("question"), Some("This field is required"));
        assert!(!form.phase().is_submitting());
    }

    #[test]
    fn test_overlong_choice_errors_on_that_field_only() {
        let mut form = form();
        fill_valid(&mut form);
        let third = form.add_choice().unwrap();
        form.set_choice(third, "x".repeat(51));

        assert_eq!(form.begin_submit(&session()), Err(SubmitBlocked::Invalid));
        assert_eq!(
            form.errors().get("choices[2]"),
            Some("Max length is 50 characters")
        );
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn test_duration_out_of_range_blocks_absent_passes() {
        let mut form = form();
        fill_valid(&mut form);

        form.set_duration_hours(Some(400));
        assert_eq!(form.begin_submit(&session()), Err(SubmitBlocked::Invalid));
        assert_eq!(
            form.errors().get("duration"),
            Some("Must be between 1 and 360")
        );

        form.set_duration_hours(None);
        assert!(form.begin_submit(&session()).is_ok());
    }

    #[test]
    fn test_signed_out_blocks_before_validation() {
        let mut form = form();
        assert_eq!(
            form.begin_submit(&Session::signed_out()),
            Err(SubmitBlocked::SignedOut)
        );
        // No validation pass ran, so no field errors were set.
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_payload_omits_blank_optional_choices() {
        let mut form = form();
        fill_valid(&mut form);
        form.add_choice();

        let request = form.begin_submit(&session()).unwrap();
        assert_eq!(request.options, vec!["base".to_string(), "optimism".to_string()]);
        assert_eq!(request.duration, None);
        assert_eq!(request.profile.fid, 7);
    }

    #[test]
    fn test_repeat_trigger_while_submitting_is_rejected() {
        let mut form = form();
        fill_valid(&mut form);

        assert!(form.begin_submit(&session()).is_ok());
        assert_eq!(
            form.begin_submit(&session()),
            Err(SubmitBlocked::SubmissionInFlight)
        );
    }

    #[test]
    fn test_success_is_terminal_and_trims_identifier() {
        let mut form = form();
        fill_valid(&mut form);
        let _ = form.begin_submit(&session()).unwrap();
        form.complete_submit(Ok("abcdef0123\n".into()));

        assert_eq!(form.poll_id(), Some(PollId::new("abcdef0123")));
        assert!(!form.editable());

        // Edits after creation are dead.
        form.set_question("too late");
        assert_eq!(form.question(), "Best L2?");
        assert!(form.add_choice().is_none());
        assert_eq!(
            form.begin_submit(&session()),
            Err(SubmitBlocked::AlreadyCreated)
        );
    }

    #[test]
    fn test_failure_retains_draft_and_reenables() {
        let mut form = form();
        fill_valid(&mut form);
        form.set_duration_hours(Some(48));

        let _ = form.begin_submit(&session()).unwrap();
        form.complete_submit(Err(BackendError::server(400, "census too large")));

        assert_eq!(form.banner(), Some("census too large"));
        assert!(form.editable());
        assert_eq!(form.question(), "Best L2?");
        assert_eq!(form.duration_hours(), Some(48));

        // The banner is dismissed by the next attempt.
        let _ = form.begin_submit(&session()).unwrap();
        assert!(form.banner().is_none());
    }

    #[test]
    fn test_duration_input_parsing_is_nan_safe() {
        let mut form = form();
        assert!(form.set_duration_input("48"));
        assert_eq!(form.duration_hours(), Some(48));

        // Junk input never produces a value that would serialize badly.
        assert!(!form.set_duration_input("soon"));
        assert_eq!(form.duration_hours(), Some(48));

        assert!(form.set_duration_input("  "));
        assert_eq!(form.duration_hours(), None);
    }
}
