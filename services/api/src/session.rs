//! Session verification
//!
//! Authentication is delegated to the external identity provider. Its
//! integration hands the browser a signed identity token (in the session
//! cookie); this module only answers whether such a token is valid and which
//! identity it asserts.

use common::models::Identity;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ServiceConfig;

/// Session verification failure
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Session token has an empty subject")]
    MissingSubject,
}

/// Answers "is this session authenticated, and as whom"
pub trait SessionVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Identity, SessionError>;
}

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// External subject identifier
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    /// Expiration time
    pub exp: u64,
}

impl From<SessionClaims> for Identity {
    fn from(claims: SessionClaims) -> Self {
        Identity {
            sub: claims.sub,
            email: claims.email,
            name: claims.name,
            picture: claims.picture,
        }
    }
}

/// Verifies HS256-signed session tokens
#[derive(Clone)]
pub struct JwtSessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionVerifier {
    pub fn new(secret: &str, issuer: Option<&str>, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
            validation.set_required_spec_claims(&["exp", "iss"]);
        }

        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            &config.session_secret,
            config.session_issuer.as_deref(),
            config.session_audience.as_deref(),
        )
    }
}

impl SessionVerifier for JwtSessionVerifier {
    fn verify(&self, token: &str) -> Result<Identity, SessionError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(SessionError::MissingSubject);
        }

        Ok(token_data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode, get_current_timestamp};
    use serde_json::json;

    const SECRET: &str = "session-test-secret";

    fn sign(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> serde_json::Value {
        json!({
            "sub": "auth0|123",
            "email": "ada@example.com",
            "name": "Ada Lovelace",
            "picture": "https://cdn.example.com/ada.png",
            "exp": get_current_timestamp() + 3600,
        })
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = JwtSessionVerifier::new(SECRET, None, None);

        let identity = verifier.verify(&sign(valid_claims(), SECRET)).unwrap();
        assert_eq!(identity.sub, "auth0|123");
        assert_eq!(identity.name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let verifier = JwtSessionVerifier::new(SECRET, None, None);

        assert!(verifier.verify(&sign(valid_claims(), "other")).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let verifier = JwtSessionVerifier::new(SECRET, None, None);
        let mut claims = valid_claims();
        claims["exp"] = json!(get_current_timestamp() - 3600);

        assert!(verifier.verify(&sign(claims, SECRET)).is_err());
    }

    #[test]
    fn test_verify_checks_issuer_when_configured() {
        let verifier = JwtSessionVerifier::new(SECRET, Some("https://tenant.auth0.com/"), None);
        let mut claims = valid_claims();

        assert!(verifier.verify(&sign(claims.clone(), SECRET)).is_err());

        claims["iss"] = json!("https://tenant.auth0.com/");
        assert!(verifier.verify(&sign(claims, SECRET)).is_ok());
    }

    #[test]
    fn test_verify_rejects_empty_subject() {
        let verifier = JwtSessionVerifier::new(SECRET, None, None);
        let mut claims = valid_claims();
        claims["sub"] = json!("");

        assert!(matches!(
            verifier.verify(&sign(claims, SECRET)),
            Err(SessionError::MissingSubject)
        ));
    }
}
