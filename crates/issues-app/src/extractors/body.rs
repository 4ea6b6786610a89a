//! Request body extractors

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    Form, Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use std::marker::PhantomData;

use crate::response::ApiError;

/// JSON body that is buffered but not decoded until [`decode`] is called,
/// so a handler can check the caller first.
///
/// [`decode`]: DeferredJson::decode
#[derive(Debug)]
pub struct DeferredJson<T> {
    bytes: Bytes,
    _target: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> DeferredJson<T> {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            _target: PhantomData,
        }
    }

    /// Decode the body; any failure is a 400 with the decoder's message
    pub fn decode(&self) -> Result<T, ApiError> {
        let Json(value) =
            Json::<T>::from_bytes(&self.bytes).map_err(|e| ApiError::invalid_body(e.body_text()))?;
        Ok(value)
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for DeferredJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;
        Ok(Self::new(bytes))
    }
}

/// Form-encoded body; any rejection is a 400
#[derive(Debug, Clone)]
pub struct FormBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;
        Ok(FormBody(value))
    }
}

/// Form with a single `value` field
#[derive(Debug, Clone, Deserialize)]
pub struct ValueForm {
    #[serde(default)]
    pub value: String,
}

impl ValueForm {
    /// Decode `value` as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.value).map_err(|e| ApiError::invalid_body(e.to_string()))
    }
}

/// Form carrying the reaction to toggle
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionForm {
    #[serde(default)]
    pub reaction: String,
}
