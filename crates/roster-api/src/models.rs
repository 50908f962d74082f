// Wire types for the user directory endpoints.

use serde::{Deserialize, Serialize};

/// A user record as returned by the list and create endpoints.
///
/// Records are accepted as-is: string fields the server omits default to
/// empty, and any extra fields (address, company, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Body of the create request. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUserRequest {
    pub name: String,
    pub username: String,
    pub email: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn record_ignores_unknown_and_defaults_missing_fields() {
        let raw = r#"{"id": 7, "name": "Kurtis", "address": {"city": "Howemouth"}}"#;
        let record: UserRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.name, "Kurtis");
        assert!(record.username.is_empty());
        assert!(record.email.is_empty());
    }

    #[test]
    fn new_user_request_has_no_id() {
        let body = serde_json::to_value(NewUserRequest {
            name: "Carl".into(),
            username: "carl3".into(),
            email: "c@x.com".into(),
        })
        .unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["username"], "carl3");
    }
}
