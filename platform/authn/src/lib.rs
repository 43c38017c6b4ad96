//! Bearer token helpers.
//!
//! Tokens only identify an employee (`sub`). Positions are always read from
//! the directory so a position change takes effect without re-issuing tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const MIN_SECRET_LEN: usize = 32;
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 12 * 60;

#[derive(Debug, Error)]
pub enum AuthnError {
    #[error("JWT secret must be at least {MIN_SECRET_LEN} bytes")]
    WeakSecret,
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

#[derive(Clone)]
pub struct AuthConfig {
    jwt_secret: String,
    pub token_ttl_minutes: i64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .finish()
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self, AuthnError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(AuthnError::WeakSecret);
        }
        Ok(Self {
            jwt_secret,
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
        })
    }

    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }

    fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.jwt_secret.as_bytes())
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.jwt_secret.as_bytes())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Employee id.
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
}

pub fn issue_token(employee_id: Uuid, config: &AuthConfig) -> Result<String, AuthnError> {
    let now = Utc::now();
    let exp = now
        .checked_add_signed(Duration::minutes(config.token_ttl_minutes))
        .unwrap_or(now)
        .timestamp() as usize;
    let claims = Claims {
        sub: employee_id,
        exp,
        iat: now.timestamp() as usize,
    };
    Ok(jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &config.encoding_key(),
    )?)
}

pub fn decode_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthnError> {
    Ok(
        jsonwebtoken::decode::<Claims>(token, &config.decoding_key(), &Validation::default())
            .map(|data| data.claims)?,
    )
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Result<&str, AuthnError> {
    let (scheme, token) = header.trim().split_once(' ').ok_or(AuthnError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthnError::MissingToken);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthnError::MissingToken);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::new("0123456789abcdef0123456789abcdef").unwrap()
    }

    #[test]
    fn short_secrets_are_rejected() {
        assert!(matches!(AuthConfig::new("short"), Err(AuthnError::WeakSecret)));
    }

    #[test]
    fn issued_token_decodes_to_subject() {
        let config = config();
        let employee = Uuid::new_v4();
        let token = issue_token(employee, &config).unwrap();
        let claims = decode_token(&token, &config).unwrap();
        assert_eq!(claims.sub, employee);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_from_other_secret_is_invalid() {
        let token = issue_token(Uuid::new_v4(), &config()).unwrap();
        let other = AuthConfig::new("ffffffffffffffffffffffffffffffff").unwrap();
        assert!(matches!(
            decode_token(&token, &other),
            Err(AuthnError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_token_is_invalid() {
        let config = config().with_ttl_minutes(-10);
        let token = issue_token(Uuid::new_v4(), &config).unwrap();
        assert!(decode_token(&token, &config).is_err());
    }

    #[test]
    fn bearer_header_parsing() {
        assert_eq!(bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert_eq!(bearer_token("bearer  abc ").unwrap(), "abc");
        assert!(bearer_token("Basic abc").is_err());
        assert!(bearer_token("Bearer").is_err());
    }
}
