//! Process-wide session state.
//!
//! One [`SessionProvider`] is created at application start and shared
//! (as an `Arc`) by every view that needs to know who is acting. The
//! provider never exchanges credentials itself; the external identity
//! collaborator calls [`SessionProvider::sign_in`] and
//! [`SessionProvider::complete_logout`] when its own flows finish.
//!
//! Sign-out is a two-step transition. [`SessionProvider::request_logout`]
//! hands back a token while the collaborator's asynchronous sign-out is
//! in flight; the session keeps reporting authenticated until
//! [`SessionProvider::complete_logout`] commits the transition. Views
//! therefore never flash a false signed-out state mid-operation.

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use votecast_core::FarcasterProfile;

// ============================================================================
// Session Snapshot
// ============================================================================

/// Immutable snapshot of the acting user's session.
///
/// The profile option is the single source of truth: a session is
/// authenticated exactly when a profile is present, so the two can never
/// disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    profile: Option<FarcasterProfile>,
}

impl Session {
    /// Create an authenticated session around a profile.
    #[must_use]
    pub fn authenticated(profile: FarcasterProfile) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    /// Create a signed-out session.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Whether the acting user is authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }

    /// The acting user's profile, when authenticated.
    #[must_use]
    pub fn profile(&self) -> Option<&FarcasterProfile> {
        self.profile.as_ref()
    }
}

/// The single branch a consuming view must render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    /// Show the sign-in affordance.
    SignedOut,
    /// Show the authenticated content for this profile.
    Authenticated(FarcasterProfile),
}

// ============================================================================
// Observation
// ============================================================================

/// Callback interface for session transitions.
pub trait SessionObserver: Send + Sync {
    /// Called after each committed sign-in or sign-out.
    fn session_changed(&self, session: &Session);
}

/// Handle identifying a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Token for an in-flight logout.
///
/// Dropping it without calling [`SessionProvider::complete_logout`]
/// leaves the session authenticated, which is the correct outcome for an
/// abandoned sign-out.
#[derive(Debug)]
#[must_use = "logout only commits via SessionProvider::complete_logout"]
pub struct LogoutRequest {
    epoch: u64,
}

// ============================================================================
// Provider
// ============================================================================

struct SessionState {
    session: Session,
    /// Bumped on every committed transition; used to discard logout
    /// completions that raced with a newer sign-in.
    epoch: u64,
    logout_pending: bool,
}

/// Process-wide session provider.
pub struct SessionProvider {
    state: RwLock<SessionState>,
    observers: Mutex<Vec<(SubscriptionId, Arc<dyn SessionObserver>)>>,
    next_subscription: AtomicU64,
}

impl Default for SessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider {
    /// Create a signed-out provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionState {
                session: Session::signed_out(),
                epoch: 0,
                logout_pending: false,
            }),
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.read().session.clone()
    }

    /// Whether the acting user is authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().session.is_authenticated()
    }

    /// The single branch a consuming view must render right now.
    #[must_use]
    pub fn view(&self) -> SessionView {
        match self.state.read().session.profile() {
            Some(profile) => SessionView::Authenticated(profile.clone()),
            None => SessionView::SignedOut,
        }
    }

    /// Commit a sign-in from the identity collaborator.
    ///
    /// Cancels any pending logout: a later [`complete_logout`] for the
    /// superseded request is discarded.
    ///
    /// [`complete_logout`]: SessionProvider::complete_logout
    pub fn sign_in(&self, profile: FarcasterProfile) {
        let snapshot = {
            let mut state = self.state.write();
            tracing::info!(fid = profile.fid, "session signed in");
            state.session = Session::authenticated(profile);
            state.logout_pending = false;
            state.epoch += 1;
            state.session.clone()
        };
        self.notify(&snapshot);
    }

    /// Start a logout.
    ///
    /// Returns `None` when already signed out. The session keeps
    /// reporting authenticated until the returned request is completed,
    /// so in-flight operations never observe a premature sign-out.
    pub fn request_logout(&self) -> Option<LogoutRequest> {
        let mut state = self.state.write();
        if !state.session.is_authenticated() {
            return None;
        }
        state.logout_pending = true;
        Some(LogoutRequest { epoch: state.epoch })
    }

    /// Whether a logout has been requested but not yet completed.
    #[must_use]
    pub fn is_logout_pending(&self) -> bool {
        self.state.read().logout_pending
    }

    /// Commit a logout started with [`request_logout`].
    ///
    /// Returns `false` (and changes nothing) when the request was
    /// superseded by a newer sign-in.
    ///
    /// [`request_logout`]: SessionProvider::request_logout
    pub fn complete_logout(&self, request: LogoutRequest) -> bool {
        let snapshot = {
            let mut state = self.state.write();
            if request.epoch != state.epoch {
                tracing::debug!("discarding superseded logout completion");
                return false;
            }
            tracing::info!("session signed out");
            state.session = Session::signed_out();
            state.logout_pending = false;
            state.epoch += 1;
            state.session.clone()
        };
        self.notify(&snapshot);
        true
    }

    /// Subscribe to committed session transitions.
    pub fn subscribe(&self, observer: Arc<dyn SessionObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.observers.lock().push((id, observer));
        id
    }

    /// Drop a subscription. No-op for unknown ids.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers.lock().retain(|(sub, _)| *sub != id);
    }

    fn notify(&self, session: &Session) {
        // Snapshot the list so observer callbacks run without the lock.
        let observers: Vec<_> = self
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer.session_changed(session);
        }
    }
}
