//! Debounced channel search with a persistent multi-select.
//!
//! The view is a state machine over
//! `Idle → Loading → Loaded | Errored`, re-entered on every issued
//! lookup. Keystrokes are debounced; the host ticks
//! [`ChannelSearchView::due_request`] (on a timer or after each event)
//! to turn the newest pending query into an actual lookup.
//!
//! Lookups can resolve out of order, so every issued request carries a
//! monotonically increasing sequence number and only the newest one is
//! allowed to apply its result (last-request-wins). Stale resolutions
//! are discarded silently; they are an anomaly, not a user-visible
//! error.
//!
//! The selection list is independent of lookup results: selecting copies
//! an option out of the transient `Loaded` set, and neither failures nor
//! later lookups touch what was already picked.

use votecast_core::{Channel, ChannelId, ChannelOption};

/// Lookup lifecycle of the search field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchPhase {
    /// No lookup issued yet.
    #[default]
    Idle,
    /// A lookup is in flight.
    Loading,
    /// The newest lookup finished; an empty set is the distinct
    /// "no matches" affordance.
    Loaded(Vec<ChannelOption>),
    /// The newest lookup failed; the message doubles as the field
    /// error.
    Errored(String),
}

/// An issued lookup, to be resolved by the host with the backend's
/// answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    seq: u64,
    query: String,
}

impl SearchRequest {
    /// The query text to send to the backend.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Headless state of the channel multi-select.
#[derive(Debug, Clone)]
pub struct ChannelSearchView {
    phase: SearchPhase,
    selected: Vec<ChannelOption>,
    pending: Option<String>,
    deadline_ms: u64,
    debounce_ms: u64,
    /// Sequence number of the newest issued lookup; zero means none.
    issued_seq: u64,
}

impl ChannelSearchView {
    /// Create an idle view with the given keystroke debounce.
    #[must_use]
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            phase: SearchPhase::Idle,
            selected: Vec::new(),
            pending: None,
            deadline_ms: 0,
            debounce_ms,
            issued_seq: 0,
        }
    }

    /// Current lookup phase.
    #[must_use]
    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// Whether a lookup is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SearchPhase::Loading)
    }

    /// Whether the newest lookup found nothing (distinct from loading
    /// and from a failure).
    #[must_use]
    pub fn is_no_matches(&self) -> bool {
        matches!(&self.phase, SearchPhase::Loaded(options) if options.is_empty())
    }

    /// Field-level error from the newest lookup, if it failed.
    #[must_use]
    pub fn field_error(&self) -> Option<&str> {
        match &self.phase {
            SearchPhase::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// The persistent selection, in pick order.
    #[must_use]
    pub fn selections(&self) -> &[ChannelOption] {
        &self.selected
    }

    /// Record a keystroke, (re)arming the debounce window.
    ///
    /// The lookup itself is issued by [`due_request`] once the window
    /// elapses; typing again before then replaces the pending query.
    ///
    /// [`due_request`]: ChannelSearchView::due_request
    pub fn set_query(&mut self, text: impl Into<String>, now_ms: u64) {
        self.pending = Some(text.into());
        self.deadline_ms = now_ms.saturating_add(self.debounce_ms);
    }

    /// Issue the pending lookup once its debounce window has elapsed.
    ///
    /// Enters `Loading` and returns the request the host must resolve.
    /// Returns `None` while the window is still open or when nothing is
    /// pending.
    pub fn due_request(&mut self, now_ms: u64) -> Option<SearchRequest> {
        if now_ms < self.deadline_ms {
            return None;
        }
        let query = self.pending.take()?;
        self.issued_seq += 1;
        self.phase = SearchPhase::Loading;
        tracing::debug!(seq = self.issued_seq, %query, "issuing channel lookup");
        Some(SearchRequest {
            seq: self.issued_seq,
            query,
        })
    }

    /// Apply a lookup completion.
    ///
    /// Only the newest issued request may apply (last-request-wins);
    /// anything older is discarded and `false` is returned. On success
    /// the channels are mapped to options and any prior field error is
    /// cleared. On failure the phase carries the message and the
    /// selection list is left untouched.
    pub fn resolve(
        &mut self,
        request: &SearchRequest,
        outcome: Result<Vec<Channel>, String>,
    ) -> bool {
        if request.seq != self.issued_seq {
            tracing::debug!(
                stale_seq = request.seq,
                newest_seq = self.issued_seq,
                "discarding stale channel lookup result"
            );
            return false;
        }
        match outcome {
            Ok(channels) => {
                self.phase =
                    SearchPhase::Loaded(channels.into_iter().map(ChannelOption::from).collect());
            }
            Err(message) => {
                self.phase = SearchPhase::Errored(message);
            }
        }
        true
    }

    /// Copy an option out of the current `Loaded` set into the
    /// selection. Returns `false` when the option is not on offer or is
    /// already selected.
    pub fn select(&mut self, id: &ChannelId) -> bool {
        let SearchPhase::Loaded(options) = &self.phase else {
            return false;
        };
        if self.selected.iter().any(|picked| picked.id == *id) {
            return false;
        }
        match options.iter().find(|option| option.id == *id) {
            Some(option) => {
                self.selected.push(option.clone());
                true
            }
            None => false,
        }
    }

    /// Remove a selection. Never triggers a lookup.
    pub fn deselect(&mut self, id: &ChannelId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|picked| picked.id != *id);
        self.selected.len() != before
    }

    /// Ids of the selected channels, in pick order.
    pub fn selected_ids(&self) -> impl Iterator<Item = &ChannelId> {
        self.selected.iter().map(|option| &option.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(id: &str) -> Channel {
        Channel {
            id: ChannelId::new(id),
            name: id.to_uppercase(),
            description: String::new(),
            followers: 0,
            image_url: format!("https://img.example/{id}.png"),
            url: String::new(),
        }
    }

    fn view() -> ChannelSearchView {
        ChannelSearchView::new(300)
    }

    #[test]
    fn test_debounce_window_gates_issue() {
        let mut search = view();
        search.set_query("voc", 1_000);

        assert!(search.due_request(1_299).is_none());
        let request = search.due_request(1_300).unwrap();
        assert_eq!(request.query(), "voc");
        assert!(search.is_loading());

        // The pending query was consumed.
        assert!(search.due_request(2_000).is_none());
    }

    #[test]
    fn test_rapid_keystrokes_coalesce_to_newest_query() {
        let mut search = view();
        search.set_query("v", 1_000);
        search.set_query("vo", 1_100);
        search.set_query("voc", 1_200);

        // Still inside the window re-armed by the last keystroke.
        assert!(search.due_request(1_400).is_none());
        let request = search.due_request(1_500).unwrap();
        assert_eq!(request.query(), "voc");
    }

    #[test]
    fn test_last_request_wins_on_out_of_order_resolution() {
        let mut search = view();
        search.set_query("a", 0);
        let first = search.due_request(300).unwrap();
        search.set_query("ab", 400);
        let second = search.due_request(700).unwrap();

        // Second resolves first and is applied.
        assert!(search.resolve(&second, Ok(vec![channel("ab-match")])));
        // The older lookup then resolves and must be discarded.
        assert!(!search.resolve(&first, Ok(vec![channel("a-match")])));

        match search.phase() {
            SearchPhase::Loaded(options) => {
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].id.as_str(), "ab-match");
            }
            other => panic!("expected loaded phase, got {other:?}"),
        }
    }

    #[test]
    fn test_stale_error_cannot_clobber_newer_result() {
        let mut search = view();
        search.set_query("a", 0);
        let first = search.due_request(300).unwrap();
        search.set_query("ab", 400);
        let second = search.due_request(700).unwrap();

        assert!(search.resolve(&second, Ok(vec![channel("keep")])));
        assert!(!search.resolve(&first, Err("boom".into())));
        assert!(search.field_error().is_none());
    }

    #[test]
    fn test_failure_surfaces_field_error_and_keeps_selection() {
        let mut search = view();
        search.set_query("voc", 0);
        let request = search.due_request(300).unwrap();
        search.resolve(&request, Ok(vec![channel("vocdoni")]));
        assert!(search.select(&ChannelId::new("vocdoni")));

        search.set_query("xyz", 1_000);
        let request = search.due_request(1_300).unwrap();
        search.resolve(&request, Err("search unavailable".into()));

        assert_eq!(search.field_error(), Some("search unavailable"));
        // Prior picks are not lost on failure.
        assert_eq!(search.selections().len(), 1);
    }

    #[test]
    fn test_success_clears_prior_field_error() {
        let mut search = view();
        search.set_query("voc", 0);
        let request = search.due_request(300).unwrap();
        search.resolve(&request, Err("search unavailable".into()));
        assert!(search.field_error().is_some());

        search.set_query("voc", 1_000);
        let request = search.due_request(1_300).unwrap();
        search.resolve(&request, Ok(vec![channel("vocdoni")]));
        assert!(search.field_error().is_none());
    }

    #[test]
    fn test_no_matches_is_distinct_from_loading_and_error() {
        let mut search = view();
        search.set_query("zzz", 0);
        let request = search.due_request(300).unwrap();
        assert!(search.is_loading());
        assert!(!search.is_no_matches());

        search.resolve(&request, Ok(Vec::new()));
        assert!(search.is_no_matches());
        assert!(!search.is_loading());
        assert!(search.field_error().is_none());
    }

    #[test]
    fn test_selection_outlives_later_lookups() {
        let mut search = view();
        search.set_query("voc", 0);
        let request = search.due_request(300).unwrap();
        search.resolve(&request, Ok(vec![channel("vocdoni"), channel("votes")]));

        assert!(search.select(&ChannelId::new("vocdoni")));
        // Selecting the same option twice is a no-op.
        assert!(!search.select(&ChannelId::new("vocdoni")));

        search.set_query("deg", 1_000);
        let request = search.due_request(1_300).unwrap();
        search.resolve(&request, Ok(vec![channel("degen")]));

        assert_eq!(search.selections().len(), 1);
        assert_eq!(search.selections()[0].id.as_str(), "vocdoni");

        assert!(search.deselect(&ChannelId::new("vocdoni")));
        assert!(search.selections().is_empty());
        // Deselecting never re-enters loading.
        assert!(!search.is_loading());
    }
}
