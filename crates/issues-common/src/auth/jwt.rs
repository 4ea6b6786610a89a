//! JWT utilities for authentication
//!
//! Access tokens carry a snapshot of the user, so resolving the current user
//! needs no lookup beyond signature and expiry checks.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use issues_core::{RepoResult, RequestContext, User, UserDirectory, UserSpec};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User domain, e.g. `github.com`
    pub domain: String,
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Rebuild the user snapshot
    ///
    /// # Errors
    /// Returns an error if the subject is not a positive user ID
    pub fn user(&self) -> Result<User, AppError> {
        let id = self
            .sub
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or(AppError::InvalidToken)?;

        let mut user = User::new(UserSpec::new(id, self.domain.clone()), self.login.clone());
        user.avatar_url.clone_from(&self.avatar_url);
        user.html_url.clone_from(&self.html_url);
        Ok(user)
    }
}

/// JWT service for encoding and decoding access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry,
        }
    }

    /// Issue an access token for `user`
    ///
    /// # Errors
    /// Returns an error for the anonymous user or if encoding fails
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        if user.is_anonymous() {
            return Err(AppError::MissingAuth);
        }
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            domain: user.domain.clone(),
            login: user.login.clone(),
            avatar_url: user.avatar_url.clone(),
            html_url: user.html_url.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns an error if the token is malformed, forged or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_expiry", &self.token_expiry)
            .finish_non_exhaustive()
    }
}

/// [`UserDirectory`] backed by bearer tokens issued by [`JwtService`]
#[derive(Debug, Clone)]
pub struct JwtUserDirectory {
    jwt: JwtService,
}

impl JwtUserDirectory {
    #[must_use]
    pub fn new(jwt: JwtService) -> Self {
        Self { jwt }
    }
}

#[async_trait]
impl UserDirectory for JwtUserDirectory {
    async fn get_authenticated(&self, ctx: &RequestContext) -> RepoResult<User> {
        let Some(token) = ctx.bearer_token() else {
            return Ok(User::anonymous());
        };
        let user = self
            .jwt
            .decode_token(token)
            .and_then(|claims| claims.user())
            .map_err(|e| {
                debug!(error = %e, "rejected bearer token");
                e
            })?;
        Ok(user)
    }
}
