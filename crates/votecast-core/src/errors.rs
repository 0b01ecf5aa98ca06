//! Error taxonomy shared across the application core.
//!
//! Three kinds of failure reach a user of the creation workflows:
//! field-scoped validation errors (correctable by editing), transport
//! failures, and errors reported by the remote service. Stale search
//! responses are a fourth, non-user-visible kind handled entirely inside
//! the search view.

use std::fmt;

/// High-level error categories for frontend error handling.
///
/// Categories give frontends a consistent way to decide presentation:
/// a field message, an inline banner, or a retry affordance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// User input validation errors (correctable by edit).
    Input,
    /// Network connectivity or transport failures (often transient).
    Network,
    /// Failures reported by the remote service.
    Server,
    /// General operation failures (catch-all).
    Operation,
}

impl ErrorCategory {
    /// Check if this error category is correctable by the user.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Input)
    }

    /// Check if this error category is likely transient.
    ///
    /// Transient errors may resolve on a user-initiated retry; nothing is
    /// retried automatically.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Get a short label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Network => "Network",
            Self::Server => "Server",
            Self::Operation => "Operation",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
