//! Request context extractor
//!
//! Collects the caller's credential and the request id. The credential is
//! not validated here; the user directory does that when the current user
//! is resolved.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization, Cookie},
    TypedHeader,
};
use issues_core::{Credential, RequestContext};

use crate::middleware::REQUEST_ID_HEADER;
use crate::response::ApiError;

/// Cookie holding an access token for browser sessions
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Per-request context threaded to every collaborator call
#[derive(Debug, Clone)]
pub struct RequestCtx(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for RequestCtx
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // The Authorization header wins over the session cookie
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());
        let token = match bearer {
            Some(token) => Some(token),
            None => TypedHeader::<Cookie>::from_request_parts(parts, state)
                .await
                .ok()
                .and_then(|TypedHeader(cookie)| {
                    cookie.get(ACCESS_TOKEN_COOKIE).map(str::to_string)
                })
                .filter(|token| !token.is_empty()),
        };

        Ok(RequestCtx(RequestContext {
            request_id,
            credential: token.map(Credential::Bearer),
        }))
    }
}
