//! Named HTML fragments for partial page updates
//!
//! The client replaces DOM nodes by fragment name. A set is sent as an
//! `application/x-www-form-urlencoded` body; a name may repeat, in which
//! case every value is applied in order.

use crate::error::RenderResult;

/// Ordered multimap of fragment name to rendered HTML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentSet {
    entries: Vec<(String, String)>,
}

impl FragmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, html: impl Into<String>) {
        self.entries.push((name.into(), html.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every value recorded under `name`, in insertion order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Form-urlencoded body
    pub fn encode(&self) -> RenderResult<String> {
        Ok(serde_urlencoded::to_string(&self.entries)?)
    }

    /// Parse a form-urlencoded body back into a set
    pub fn decode(body: &str) -> Result<Self, serde_urlencoded::de::Error> {
        Ok(Self {
            entries: serde_urlencoded::from_str(body)?,
        })
    }
}
