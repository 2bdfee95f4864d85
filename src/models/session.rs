use serde::{Deserialize, Serialize};

use super::subscription::SubscriptionTier;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    pub name: String,
}

/// Authenticated session as returned by the login endpoint and persisted
/// across reloads. The tier is a snapshot taken at login; the subscription
/// context holds the live value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
    pub tier: SubscriptionTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trip() {
        let session = Session {
            user: UserProfile {
                id: 42,
                email: "jiyoung@example.com".into(),
                name: "김지영".into(),
            },
            token: "tok_abc123".into(),
            tier: SubscriptionTier::Premium,
        };

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
