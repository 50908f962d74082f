// ── API-to-domain type conversions ──
//
// Bridges raw `roster_api` wire types and `roster_core::model` domain types.

use roster_api::{NewUserRequest, UserRecord};

use crate::model::{User, UserDraft, UserId};

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: UserId(r.id),
            name: r.name,
            username: r.username,
            email: r.email,
        }
    }
}

impl From<&UserDraft> for NewUserRequest {
    fn from(d: &UserDraft) -> Self {
        Self {
            name: d.name.clone(),
            username: d.username.clone(),
            email: d.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_maps_field_for_field() {
        let user = User::from(UserRecord {
            id: 1,
            name: "Alice".into(),
            username: "alice1".into(),
            email: "a@x.com".into(),
        });
        assert_eq!(user, User::new(1, "Alice", "alice1", "a@x.com"));
    }

    #[test]
    fn draft_becomes_request_body() {
        let req = NewUserRequest::from(&UserDraft::new("Carl", "carl3", "c@x.com"));
        assert_eq!(req.name, "Carl");
        assert_eq!(req.username, "carl3");
        assert_eq!(req.email, "c@x.com");
    }
}
