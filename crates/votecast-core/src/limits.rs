//! Cardinality and length limits enforced by the creation workflows.

/// Minimum number of poll choices.
pub const MIN_CHOICES: usize = 2;
/// Maximum number of poll choices.
pub const MAX_CHOICES: usize = 4;

/// Maximum length of a poll question, in characters.
pub const MAX_QUESTION_LEN: usize = 250;
/// Maximum length of a single poll choice, in characters.
pub const MAX_CHOICE_LEN: usize = 50;

/// Shortest allowed voting window, in hours.
pub const MIN_DURATION_HOURS: i64 = 1;
/// Longest allowed voting window, in hours (15 days).
pub const MAX_DURATION_HOURS: i64 = 360;
/// Voting window the service applies when none is requested.
///
/// Informational only: the client never substitutes this into a request;
/// an empty duration field is transmitted as an absent key.
pub const DEFAULT_DURATION_HOURS: i64 = 24;

/// Maximum length of a community name, in characters.
pub const MAX_COMMUNITY_NAME_LEN: usize = 64;
/// Minimum number of census addresses for a token census.
pub const MIN_CENSUS_ADDRESSES: usize = 1;
/// Maximum number of census addresses for a token census.
pub const MAX_CENSUS_ADDRESSES: usize = 3;
