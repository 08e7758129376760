use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The `User` struct represents the authenticated account as the backend
/// reports it from `GET /auth/me` and inside login/register responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response body shared by `POST /auth/login` and `POST /auth/register`:
/// a fresh bearer token plus the user record it belongs to.
#[derive(Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

/// Profile fields sent to `POST /auth/register`.
#[derive(Serialize, Debug, Clone)]
pub struct RegisterProfile {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The backend omits optional fields for plain accounts; those must
    /// default rather than fail deserialization.
    #[test]
    fn test_user_minimal_body() {
        let body = r#"{"id": 7, "email": "a@x.com", "full_name": "Ada X"}"#;
        let user: User = serde_json::from_str(body).expect("minimal user should parse");

        assert_eq!(user.id, 7);
        assert_eq!(user.email, "a@x.com");
        assert!(!user.is_admin);
        assert!(user.phone.is_none());
        assert!(user.referral_code.is_none());
    }

    #[test]
    fn test_user_full_body() {
        let body = r#"{
            "id": 1,
            "email": "admin@cheapdata.test",
            "full_name": "Site Admin",
            "phone": "+233200000000",
            "is_admin": true,
            "referral_code": "ADM1N",
            "created_at": "2025-11-02T09:30:00Z"
        }"#;
        let user: User = serde_json::from_str(body).expect("full user should parse");

        assert!(user.is_admin);
        assert_eq!(user.referral_code.as_deref(), Some("ADM1N"));
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_auth_response() {
        let body = r#"{
            "access_token": "tok1",
            "user": {"id": 1, "email": "a@x.com", "full_name": "Ada X", "is_admin": false}
        }"#;
        let resp: AuthResponse = serde_json::from_str(body).expect("auth response should parse");

        assert_eq!(resp.access_token, "tok1");
        assert_eq!(resp.user.id, 1);
    }

    /// Absent optional profile fields are dropped from the request body
    /// instead of being serialized as nulls.
    #[test]
    fn test_register_profile_skips_absent_fields() {
        let profile = RegisterProfile {
            full_name: "Ada X".to_string(),
            email: "a@x.com".to_string(),
            phone: None,
            password: "secret".to_string(),
            referral_code: None,
        };
        let value = serde_json::to_value(&profile).expect("profile should serialize");
        let object = value.as_object().expect("profile should be an object");

        assert!(!object.contains_key("phone"));
        assert!(!object.contains_key("referral_code"));
        assert_eq!(object["email"], "a@x.com");
    }
}
