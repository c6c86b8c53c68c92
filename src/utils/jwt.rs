use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("token lifetime {0} overflows the clock")]
    Lifetime(Duration),

    #[error(transparent)]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by an admin bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthClaims {
    pub admin_id: Uuid,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies HS256 admin tokens. Holds no per-session state.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expires_in: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    pub fn issue(
        &self,
        admin_id: Uuid,
        username: &str,
    ) -> Result<String, IssueError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.expires_in)
            .ok_or(IssueError::Lifetime(self.expires_in))?;
        let claims = AuthClaims {
            admin_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Checks signature and expiry, returning the embedded identity.
    pub fn verify(&self, token: &str) -> Result<AuthClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<AuthClaims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}
