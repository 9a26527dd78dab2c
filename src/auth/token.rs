use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Claims carried by an admin bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    pub role_id: i64,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Issues and verifies HS256 tokens with one server-wide secret.
///
/// Holds no per-user state; a token is valid exactly when its signature
/// checks out and `exp` lies in the future.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: (ttl_hours as i64).saturating_mul(3600),
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub fn issue(&self, user_id: i64, username: &str, role_id: i64) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id,
            username: username.to_string(),
            role_id,
            iat: now,
            exp: now + self.ttl_secs,
        };
        self.sign(&claims)
    }

    /// Signs arbitrary claims; `issue` is the normal entry point.
    pub fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("token encoding failed: {e}")))
    }

    /// Verifies signature, algorithm and expiry; any failure is `InvalidToken`.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("token rejected: {}", e);
                AppError::InvalidToken
            })
    }
}

/// Extracts the raw token from an `Authorization` header value.
///
/// The `Bearer ` prefix is optional; a bare token is accepted as well.
pub fn token_from_header(value: &str) -> &str {
    let value = value.trim();
    value.strip_prefix("Bearer ").map(str::trim).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_optional_bearer_prefix() {
        assert_eq!(token_from_header("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(token_from_header("abc.def.ghi"), "abc.def.ghi");
        assert_eq!(token_from_header("  Bearer   xyz "), "xyz");
    }

    #[test]
    fn ttl_is_hours_in_seconds() {
        assert_eq!(TokenService::new("0123456789abcdef", 24).ttl_secs(), 86_400);
    }
}
