//! Emoji identifier used by reactions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Emoji shortcode without the surrounding colons, e.g. `+1` or `tada`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmojiId(String);

impl EmojiId {
    /// Build from user input, accepting `:name:` as well as `name`
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().trim_matches(':').to_string())
    }

    /// Build from user input, rejecting anything but a plain shortcode.
    ///
    /// Shortcodes are non-empty and limited to `a-z`, `0-9`, `_`, `+` and `-`.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, DomainError> {
        let emoji = Self::new(id);
        if emoji.is_empty() {
            return Err(DomainError::validation("reaction must not be empty"));
        }
        if !emoji.is_valid() {
            return Err(DomainError::validation(format!(
                "invalid reaction: {:?}",
                emoji.0
            )));
        }
        Ok(emoji)
    }

    /// Non-empty and made of shortcode characters only
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .bytes()
                .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'+' | b'-'))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EmojiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
