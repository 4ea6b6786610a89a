//! Mutation requests accepted by an [`IssueStore`](crate::IssueStore)
//!
//! Requests are validated with the `validator` crate before they reach a
//! store; `check()` folds the validator output into a [`DomainError`].

use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::DomainError;
use crate::value_objects::{EmojiId, IssueState};

/// Fold validator output into a single human readable message
fn into_domain_error(errors: &ValidationErrors) -> DomainError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("invalid {field}"),
            })
        })
        .collect();
    messages.sort();
    DomainError::validation(messages.join("; "))
}

fn validate_state(state: &str) -> Result<(), ValidationError> {
    match state {
        IssueState::OPEN | IssueState::CLOSED => Ok(()),
        _ => Err(ValidationError::new("state").with_message(Cow::Borrowed("bad state"))),
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message(Cow::Borrowed("title must not be blank")))
    } else {
        Ok(())
    }
}

// ============================================================================
// Issue edits
// ============================================================================

/// Change of an issue's state and/or title.
///
/// Field names follow the browser client, which posts `{"State": ..,
/// "Title": ..}`; lowercase keys are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct IssueRequest {
    #[serde(default, rename = "State", alias = "state")]
    #[validate(custom(function = "validate_state"))]
    pub state: Option<String>,

    #[serde(default, rename = "Title", alias = "title")]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,
}

impl IssueRequest {
    pub fn close() -> Self {
        Self {
            state: Some(IssueState::CLOSED.to_string()),
            title: None,
        }
    }

    pub fn reopen() -> Self {
        Self {
            state: Some(IssueState::OPEN.to_string()),
            title: None,
        }
    }

    pub fn rename(title: impl Into<String>) -> Self {
        Self {
            state: None,
            title: Some(title.into()),
        }
    }

    /// Validate; `state`, when present, must be exactly `open` or `closed`
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate().map_err(|e| into_domain_error(&e))
    }

    /// Requested state, if any
    pub fn state(&self) -> Option<IssueState> {
        self.state.as_deref().map(IssueState::from)
    }
}

// ============================================================================
// Comment edits
// ============================================================================

/// Change to an existing comment: a new body, a reaction toggle, or both
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRequest {
    pub id: u64,
    pub body: Option<String>,
    pub reaction: Option<EmojiId>,
}

impl CommentRequest {
    pub fn body(id: u64, body: impl Into<String>) -> Self {
        Self {
            id,
            body: Some(body.into()),
            reaction: None,
        }
    }

    pub fn reaction(id: u64, emoji: EmojiId) -> Self {
        Self {
            id,
            body: None,
            reaction: Some(emoji),
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        if self.body.is_none() && self.reaction.is_none() {
            return Err(DomainError::validation("nothing to change"));
        }
        if let Some(emoji) = &self.reaction {
            if emoji.is_empty() {
                return Err(DomainError::validation("reaction must not be empty"));
            }
            if !emoji.is_valid() {
                return Err(DomainError::validation(format!(
                    "invalid reaction: {:?}",
                    emoji.as_str()
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Issue creation
// ============================================================================

/// New issue submitted from the creation form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct NewIssue {
    #[serde(alias = "Title")]
    #[validate(
        length(max = 256, message = "title must be at most 256 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[serde(default, alias = "Body")]
    pub body: String,
}

impl NewIssue {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        self.validate().map_err(|e| into_domain_error(&e))
    }
}
