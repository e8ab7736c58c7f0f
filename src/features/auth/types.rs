//! Request and response types for auth-related API calls. Credentials carry
//! passwords and login responses carry tokens, so none of them may be logged.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Recruiter,
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(formatter, "admin"),
            Self::Recruiter => write!(formatter, "recruiter"),
        }
    }
}

/// User record as returned by the API. Replaced wholesale on every login or
/// hydration, never patched.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl UserRecord {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Username and password pair used by login, bootstrap and recruiter creation.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Both fields must be non-empty after trimming.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.expose_secret().trim().is_empty()
    }
}

impl Serialize for Credentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            username: &'a str,
            password: &'a str,
        }

        Wire {
            username: &self.username,
            password: self.password.expose_secret(),
        }
        .serialize(serializer)
    }
}

/// Successful `POST /api/auth/login` body.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(deserialize_with = "deserialize_secret")]
    pub access_token: SecretString,
    pub user: UserRecord,
}

fn deserialize_secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

/// Success body of account-creating endpoints. The shape is loosely defined by
/// the API, so every field is optional.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct AccountCreated {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credentials_serialize_plain_password() {
        let credentials = Credentials::new("admin", "pass");
        let value = serde_json::to_value(&credentials).unwrap();
        assert_eq!(value, json!({ "username": "admin", "password": "pass" }));
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials::new("admin", "hunter2");
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }

    #[test]
    fn credentials_completeness_trims() {
        assert!(Credentials::new("admin", "pass").is_complete());
        assert!(!Credentials::new("   ", "pass").is_complete());
        assert!(!Credentials::new("admin", " \t").is_complete());
    }

    #[test]
    fn user_record_ignores_extra_fields() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": 7,
            "username": "rita",
            "role": "recruiter",
            "is_active": true
        }))
        .unwrap();
        assert_eq!(user.role, Role::Recruiter);
        assert!(!user.is_admin());
    }

    #[test]
    fn account_created_tolerates_missing_fields() {
        let created: AccountCreated = serde_json::from_value(json!({})).unwrap();
        assert_eq!(created, AccountCreated::default());
    }
}
