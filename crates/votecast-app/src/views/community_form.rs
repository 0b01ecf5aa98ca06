//! Community creation form.
//!
//! Mirrors the poll form's machinery: a draft edited through bounded
//! row lists and the channel multi-select, one validation pass per
//! submit attempt, and the shared submission phase machine. Which
//! census inputs are validated and sent depends on the selected census
//! type.

use crate::backend::{BackendError, VoteBackend};
use crate::config::AppConfig;
use crate::fields::{FieldList, RowId};
use crate::session::Session;
use crate::validation::{FieldValue, Rule, ValidationErrors, Validator};
use crate::views::channel_search::ChannelSearchView;
use crate::views::submit::{normalize_id, SubmitBlocked, SubmitPhase};
use votecast_core::{limits, CensusAddress, CensusType, CreateCommunityRequest};

/// Headless state of the community creation form.
pub struct CommunityFormView {
    name: String,
    census_type: CensusType,
    addresses: FieldList<CensusAddress>,
    channel_search: ChannelSearchView,
    group_chat_url: String,
    phase: SubmitPhase,
    errors: ValidationErrors,
}

impl CommunityFormView {
    /// Create an empty draft with one blank census address row.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            name: String::new(),
            census_type: CensusType::default(),
            addresses: FieldList::new(limits::MIN_CENSUS_ADDRESSES, limits::MAX_CENSUS_ADDRESSES),
            channel_search: ChannelSearchView::new(config.search_debounce_ms),
            group_chat_url: String::new(),
            phase: SubmitPhase::Idle,
            errors: ValidationErrors::default(),
        }
    }

    // =========================================================================
    // Draft Access & Editing
    // =========================================================================

    /// Whether the draft accepts edits.
    #[must_use]
    pub fn editable(&self) -> bool {
        matches!(self.phase, SubmitPhase::Idle | SubmitPhase::Failed { .. })
    }

    /// The community name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the community name. No-op when not editable.
    pub fn set_name(&mut self, name: impl Into<String>) {
        if self.editable() {
            self.name = name.into();
        }
    }

    /// The selected census type.
    #[must_use]
    pub fn census_type(&self) -> CensusType {
        self.census_type
    }

    /// Switch census type. Both partial inputs (addresses, channels)
    /// are kept, so switching back loses nothing; only the active one
    /// is validated and sent.
    pub fn set_census_type(&mut self, census_type: CensusType) {
        if self.editable() {
            self.census_type = census_type;
        }
    }

    /// The census address rows.
    #[must_use]
    pub fn addresses(&self) -> &FieldList<CensusAddress> {
        &self.addresses
    }

    /// Add a blank census address row. `None` at the maximum of three.
    pub fn add_address(&mut self) -> Option<RowId> {
        if !self.editable() {
            return None;
        }
        self.addresses.append(CensusAddress::default())
    }

    /// Remove a census address row. No-op at the minimum of one.
    pub fn remove_address(&mut self, id: RowId) -> bool {
        self.editable() && self.addresses.remove(id)
    }

    /// Replace an address row's contract address.
    pub fn set_address(&mut self, id: RowId, address: impl Into<String>) -> bool {
        if !self.editable() {
            return false;
        }
        let address = address.into();
        self.addresses.update(id, |row| row.address = address)
    }

    /// Replace an address row's blockchain.
    pub fn set_blockchain(&mut self, id: RowId, blockchain: impl Into<String>) -> bool {
        if !self.editable() {
            return false;
        }
        let blockchain = blockchain.into();
        self.addresses.update(id, |row| row.blockchain = blockchain)
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

    /// The group chat URL text.
    #[must_use]
    pub fn group_chat_url(&self) -> &str {
        &self.group_chat_url
    }

    /// Set the group chat URL. No-op when not editable.
    pub fn set_group_chat_url(&mut self, url: impl Into<String>) {
        if self.editable() {
            self.group_chat_url = url.into();
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Run one validation pass over the current draft.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut validator = Validator::new();
        validator.check(
            "name",
            FieldValue::Text(&self.name),
            &[Rule::Required, Rule::MaxLength(limits::MAX_COMMUNITY_NAME_LEN)],
        );
        if self.census_type.uses_addresses() {
            for (index, row) in self.addresses.values().enumerate() {
                validator.check(
                    &format!("addresses[{index}]"),
                    FieldValue::Text(&row.address),
                    &[Rule::Required],
                );
            }
        }
        let mut errors = validator.finish();
        if self.census_type.uses_channels() && self.channel_search.selections().is_empty() {
            errors.set("channels", "Select at least one channel");
        }
        errors
    }

    /// Errors from the last submit attempt.
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The error to show on the channels field: a failed lookup takes
    /// precedence over the selection requirement.
    #[must_use]
    pub fn channels_error(&self) -> Option<&str> {
        self.channel_search
            .field_error()
            .or_else(|| self.errors.get("channels"))
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

    /// Identifier of the created community, once succeeded.
    #[must_use]
    pub fn community_id(&self) -> Option<&str> {
        self.phase.succeeded_id()
    }

    /// Start a submission: gate on session and phase, validate, and
    /// build the wire payload. Same contract as the poll form.
    pub fn begin_submit(
        &mut self,
        session: &Session,
    ) -> Result<CreateCommunityRequest, SubmitBlocked> {
        match self.phase {
            SubmitPhase::Submitting => return Err(SubmitBlocked::SubmissionInFlight),
            SubmitPhase::Succeeded { .. } => return Err(SubmitBlocked::AlreadyCreated),
            SubmitPhase::Idle | SubmitPhase::Failed { .. } => {}
        }
        if session.profile().is_none() {
            return Err(SubmitBlocked::SignedOut);
        }

        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return Err(SubmitBlocked::Invalid);
        }
        self.errors = ValidationErrors::default();
        self.phase = SubmitPhase::Submitting;

        let group_chat_url = self.group_chat_url.trim();
        Ok(CreateCommunityRequest {
            name: self.name.clone(),
            census_type: self.census_type,
            census_addresses: if self.census_type.uses_addresses() {
                self.addresses.values().cloned().collect()
            } else {
                Vec::new()
            },
            channels: if self.census_type.uses_channels() {
                self.channel_search.selected_ids().cloned().collect()
            } else {
                Vec::new()
            },
            group_chat_url: (!group_chat_url.is_empty()).then(|| group_chat_url.to_string()),
        })
    }

    /// Record the outcome of the in-flight submission.
    pub fn complete_submit(&mut self, outcome: Result<String, BackendError>) {
        if !self.phase.is_submitting() {
            tracing::debug!("ignoring completion with no submission in flight");
            return;
        }
        match outcome {
            Ok(raw) => {
                let id = normalize_id(&raw);
                tracing::info!(community_id = id, "community created");
                self.phase = SubmitPhase::Succeeded { id: id.to_string() };
            }
            Err(error) => {
                tracing::warn!(%error, "community creation failed");
                self.phase = SubmitPhase::Failed {
                    message: error.user_message(),
                };
            }
        }
    }

    /// Drive a full submission against a backend.
    pub async fn submit(
        &mut self,
        session: &Session,
        backend: &dyn VoteBackend,
    ) -> Result<(), SubmitBlocked> {
        let request = self.begin_submit(session)?;
        let outcome = backend.create_community(&request).await;
        self.complete_submit(outcome);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votecast_core::{Channel, ChannelId, FarcasterProfile};

    fn form() -> CommunityFormView {
        CommunityFormView::new(&AppConfig::default())
    }

    fn session() -> Session {
        Session::authenticated(FarcasterProfile {
            fid: 7,
            username: "alice".into(),
            ..Default::default()
        })
    }

    fn pick_channel(form: &mut CommunityFormView, id: &str) {
        let search = form.channel_search_mut();
        search.set_query(id, 0);
        let request = search.due_request(1_000).unwrap();
        search.resolve(
            &request,
            Ok(vec![Channel {
                id: ChannelId::new(id),
                name: id.to_uppercase(),
                description: String::new(),
                followers: 0,
                image_url: String::new(),
                url: String::new(),
            }]),
        );
        assert!(search.select(&ChannelId::new(id)));
    }

    #[test]
    fn test_token_census_requires_address_rows() {
        let mut form = form();
        form.set_name("Builders");
        form.set_census_type(CensusType::Erc20);

        assert_eq!(form.begin_submit(&session()), Err(SubmitBlocked::Invalid));
        assert_eq!(
            form.errors().get("addresses[0]"),
            Some("This field is required")
        );
    }

    #[test]
    fn test_channel_census_requires_a_selection() {
        let mut form = form();
        form.set_name("Builders");
        form.set_census_type(CensusType::Channel);

        assert_eq!(form.begin_submit(&session()), Err(SubmitBlocked::Invalid));
        assert_eq!(form.channels_error(), Some("Select at least one channel"));

        pick_channel(&mut form, "builders");
        assert!(form.begin_submit(&session()).is_ok());
    }

    #[test]
    fn test_lookup_failure_takes_precedence_on_channels_field() {
        let mut form = form();
        form.set_census_type(CensusType::Channel);

        let search = form.channel_search_mut();
        search.set_query("x", 0);
        let request = search.due_request(1_000).unwrap();
        search.resolve(&request, Err("search unavailable".into()));

        assert_eq!(form.channels_error(), Some("search unavailable"));
    }

    #[test]
    fn test_payload_carries_only_the_active_census_anchor() {
        let mut form = form();
        form.set_name("Builders");
        form.set_census_type(CensusType::Channel);
        pick_channel(&mut form, "builders");

        // Leftover address edits from a previous census type are kept in
        // the draft but never sent.
        let row = form.addresses().row_ids().next().unwrap();
        form.set_address(row, "0xabc");
        form.set_blockchain(row, "base");

        let request = form.begin_submit(&session()).unwrap();
        assert!(request.census_addresses.is_empty());
        assert_eq!(request.channels, vec![ChannelId::new("builders")]);
        assert_eq!(request.group_chat_url, None);
    }

    #[test]
    fn test_address_rows_are_bounded_one_to_three() {
        let mut form = form();
        assert_eq!(form.addresses().len(), 1);
        assert!(form.add_address().is_some());
        assert!(form.add_address().is_some());
        assert!(form.add_address().is_none());

        let ids: Vec<_> = form.addresses().row_ids().collect();
        assert!(form.remove_address(ids[0]));
        assert!(form.remove_address(ids[1]));
        assert!(!form.remove_address(ids[2]));
        assert_eq!(form.addresses().len(), 1);
    }

    #[test]
    fn test_failure_keeps_draft_success_is_terminal() {
        let mut form = form();
        form.set_name("Builders");
        form.set_census_type(CensusType::Erc20);
        let row = form.addresses().row_ids().next().unwrap();
        form.set_address(row, "0xabc");

        let _ = form.begin_submit(&session()).unwrap();
        form.complete_submit(Err(BackendError::server(409, "name already taken")));
        assert_eq!(form.banner(), Some("name already taken"));
        assert_eq!(form.name(), "Builders");
        assert!(form.editable());

        let _ = form.begin_submit(&session()).unwrap();
        form.complete_submit(Ok("42\n".into()));
        assert_eq!(form.community_id(), Some("42"));
        assert!(!form.editable());
        form.set_name("too late");
        assert_eq!(form.name(), "Builders");
    }
}
