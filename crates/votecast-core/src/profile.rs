//! Farcaster account profile.
//!
//! Issued by the external identity collaborator on sign-in and attached
//! verbatim to creation requests. The client never constructs or mutates
//! one of these itself.

use serde::{Deserialize, Serialize};

/// Profile of an authenticated Farcaster user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarcasterProfile {
    /// Farcaster id number.
    pub fid: u64,
    /// Account handle.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Profile bio text.
    pub bio: String,
    /// Custody address holding the account.
    pub custody: String,
    /// Profile picture URL.
    pub pfp_url: String,
    /// Verified addresses attached to the account.
    pub verifications: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_json_field_names() {
        let profile = FarcasterProfile {
            fid: 42,
            username: "alice".into(),
            display_name: "Alice".into(),
            pfp_url: "https://img.example/alice.png".into(),
            ..Default::default()
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["fid"], 42);
        assert_eq!(value["displayName"], "Alice");
        assert_eq!(value["pfpUrl"], "https://img.example/alice.png");
    }

    #[test]
    fn test_profile_tolerates_missing_fields() {
        let profile: FarcasterProfile =
            serde_json::from_str(r#"{"fid": 7, "username": "bob"}"#).unwrap();
        assert_eq!(profile.fid, 7);
        assert_eq!(profile.username, "bob");
        assert!(profile.verifications.is_empty());
    }
}
