//! Local verification of auth-service access tokens

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::data::types::AuthUser;

/// Audience the auth service stamps on user tokens
const TOKEN_AUDIENCE: &str = "authenticated";

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Access token has expired")]
    Expired,
    #[error("Invalid access token signature")]
    InvalidSignature,
    #[error("Invalid access token: {0}")]
    Invalid(String),
}

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User id
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub aud: Option<String>,
}

impl AccessClaims {
    pub fn user(&self) -> AuthUser {
        AuthUser {
            id: self.sub.clone(),
            email: self.email.clone(),
        }
    }
}

/// Validate an HS256 access token against the project's JWT secret
pub fn validate_access_token(token: &str, secret: &[u8]) -> Result<AccessClaims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_audience(&[TOKEN_AUDIENCE]);

    decode::<AccessClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            _ => JwtError::Invalid(e.to_string()),
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    pub(crate) fn sign(secret: &[u8], sub: &str, exp_offset_secs: i64) -> String {
        let claims = AccessClaims {
            sub: sub.to_string(),
            email: Some(format!("{sub}@example.com")),
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
            aud: Some(TOKEN_AUDIENCE.to_string()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token() {
        let token = sign(b"secret", "user-1", 600);
        let claims = validate_access_token(&token, b"secret").unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.user().email.as_deref(), Some("user-1@example.com"));
    }

    #[test]
    fn test_wrong_secret() {
        let token = sign(b"secret", "user-1", 600);
        assert!(matches!(
            validate_access_token(&token, b"other"),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token() {
        let token = sign(b"secret", "user-1", -3600);
        assert!(matches!(
            validate_access_token(&token, b"secret"),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            validate_access_token("not-a-jwt", b"secret"),
            Err(JwtError::Invalid(_))
        ));
    }
}
