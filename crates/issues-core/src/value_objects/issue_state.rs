//! Issue state and the list filter derived from it

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// State of an issue.
///
/// Stores may report states this tracker does not know about; those are
/// carried verbatim in `Other` so rendering can still show them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueState {
    Open,
    Closed,
    Other(String),
}

impl IssueState {
    pub const OPEN: &'static str = "open";
    pub const CLOSED: &'static str = "closed";

    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => Self::OPEN,
            Self::Closed => Self::CLOSED,
            Self::Other(s) => s,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl From<String> for IssueState {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::OPEN => Self::Open,
            Self::CLOSED => Self::Closed,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for IssueState {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<IssueState> for String {
    fn from(state: IssueState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which issues a list or count query selects.
///
/// There is deliberately no "all" variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    #[default]
    Open,
    Closed,
}

impl StateFilter {
    /// Query-string key that selects the filter
    pub const QUERY_KEY: &'static str = "state";

    /// Parse the value of the `state` query parameter.
    ///
    /// Absent and `open` both select open issues; `closed` selects closed
    /// issues; anything else is rejected.
    pub fn from_query(value: Option<&str>) -> Result<Self, DomainError> {
        match value {
            None | Some(IssueState::OPEN) => Ok(Self::Open),
            Some(IssueState::CLOSED) => Ok(Self::Closed),
            Some(other) => Err(DomainError::validation(format!(
                "unsupported state filter: {other:?}"
            ))),
        }
    }

    /// Whether an issue in `state` is selected by this filter
    pub fn matches(self, state: &IssueState) -> bool {
        match self {
            Self::Open => state.is_open(),
            Self::Closed => state.is_closed(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => IssueState::OPEN,
            Self::Closed => IssueState::CLOSED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_roundtrip_through_string() {
        assert_eq!(IssueState::from("open"), IssueState::Open);
        assert_eq!(IssueState::from("closed"), IssueState::Closed);
        assert_eq!(
            IssueState::from("triaged"),
            IssueState::Other("triaged".to_string())
        );
        assert_eq!(IssueState::Other("x".into()).to_string(), "x");
    }

    #[test]
    fn test_state_serde_as_plain_string() {
        let json = serde_json::to_string(&IssueState::Closed).unwrap();
        assert_eq!(json, "\"closed\"");
        let state: IssueState = serde_json::from_str("\"open\"").unwrap();
        assert!(state.is_open());
    }

    #[test]
    fn test_filter_default_equivalence() {
        assert_eq!(StateFilter::from_query(None).unwrap(), StateFilter::Open);
        assert_eq!(
            StateFilter::from_query(Some("open")).unwrap(),
            StateFilter::from_query(None).unwrap()
        );
        assert_eq!(
            StateFilter::from_query(Some("closed")).unwrap(),
            StateFilter::Closed
        );
    }

    #[test]
    fn test_filter_rejects_unknown_values() {
        assert!(StateFilter::from_query(Some("all")).unwrap_err().is_validation());
        assert!(StateFilter::from_query(Some("")).is_err());
        assert!(StateFilter::from_query(Some("Closed")).is_err());
    }

    #[test]
    fn test_filter_matches() {
        assert!(StateFilter::Open.matches(&IssueState::Open));
        assert!(!StateFilter::Open.matches(&IssueState::Closed));
        assert!(StateFilter::Closed.matches(&IssueState::Closed));
        assert!(!StateFilter::Closed.matches(&IssueState::Other("x".into())));
    }
}
