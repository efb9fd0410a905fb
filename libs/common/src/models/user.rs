//! User directory models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Role of a local user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Looks for jobs; every provisioned user starts here
    #[default]
    Jobseeker,
    /// Publishes jobs on behalf of an employer
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Jobseeker => "jobseeker",
            Role::Recruiter => "recruiter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jobseeker" => Ok(Role::Jobseeker),
            "recruiter" => Ok(Role::Recruiter),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Local shadow record of an external identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub auth0_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity claims asserted by the external identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// External subject identifier
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Response of the authentication check endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub user: Option<Identity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_its_string_form() {
        assert_eq!("jobseeker".parse::<Role>(), Ok(Role::Jobseeker));
        assert_eq!("recruiter".parse::<Role>(), Ok(Role::Recruiter));
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::Jobseeker);
    }

    #[test]
    fn test_user_serializes_with_wire_field_names() {
        let user = User {
            id: Uuid::new_v4(),
            auth0_id: "auth0|42".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            role: Role::Jobseeker,
            profile_picture: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["_id"], serde_json::json!(user.id));
        assert_eq!(value["auth0Id"], "auth0|42");
        assert_eq!(value["role"], "jobseeker");
        assert!(value.get("profilePicture").is_some());
    }

    #[test]
    fn test_identity_tolerates_missing_profile_claims() {
        let identity: Identity = serde_json::from_str(r#"{"sub":"auth0|7"}"#).unwrap();
        assert_eq!(identity.sub, "auth0|7");
        assert!(identity.email.is_none());
        assert!(identity.picture.is_none());
    }
}
