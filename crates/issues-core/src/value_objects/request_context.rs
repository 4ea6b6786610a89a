//! Per-request context threaded to every collaborator call

/// Credential presented by the client
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Bearer token from the `Authorization` header or the session cookie
    Bearer(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(***)"),
        }
    }
}

/// Request-scoped context.
///
/// Carries what collaborators need to act on behalf of the caller. Dropping
/// the request future cancels every call made with it.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub credential: Option<Credential>,
}

impl RequestContext {
    /// Context for background or test use with no caller identity
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_bearer(token: impl Into<String>) -> Self {
        Self {
            request_id: None,
            credential: Some(Credential::Bearer(token.into())),
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        match &self.credential {
            Some(Credential::Bearer(t)) => Some(t),
            None => None,
        }
    }
}
