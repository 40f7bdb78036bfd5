//! JWT token service implementation.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use blog_core::domain::{Email, UserId};
use blog_core::ports::{AuthError, TokenClaims, TokenService};

/// JWT token service configuration.
///
/// Has no `Default`: the signing secret is always supplied by the caller.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    email: String,
    exp: i64,    // expiration timestamp
    iat: i64,    // issued at
    iss: String, // issuer
}

/// JWT-based token service. Stateless, so revocation is a no-op.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: TimeDelta,
    config: JwtConfig,
}

impl JwtTokenService {
    /// Fails unless `expiration_hours` is positive and representable in seconds.
    pub fn new(config: JwtConfig) -> Result<Self, AuthError> {
        let ttl = TimeDelta::try_hours(config.expiration_hours)
            .filter(|ttl| *ttl > TimeDelta::zero())
            .ok_or_else(|| {
                AuthError::InvalidLifetime(format!("{} hours", config.expiration_hours))
            })?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            encoding_key,
            decoding_key,
            ttl,
            config,
        })
    }
}

#[async_trait]
impl TokenService for JwtTokenService {
    async fn generate_token(&self, user_id: &UserId, email: &Email) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::InvalidLifetime("expiry out of range".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    async fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let claims = token_data.claims;
        let user_id =
            UserId::new(claims.sub).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let email = Email::new(claims.email).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| AuthError::InvalidToken("exp out of range".to_string()))?;

        Ok(TokenClaims {
            user_id,
            email,
            expires_at,
        })
    }

    async fn revoke_token(&self, _token: &str) -> Result<(), AuthError> {
        Ok(())
    }

    fn expiration_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }
}
