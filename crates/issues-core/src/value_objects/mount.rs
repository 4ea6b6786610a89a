//! Mount point of the tracker inside an embedding application

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the repository whose issues are served
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoSpec {
    pub uri: String,
}

impl RepoSpec {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Where the tracker is mounted: the repository it serves and the URL
/// prefix under which its routes live.
///
/// Both values come from the embedding application; either may be missing
/// when the embedder is misconfigured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mount {
    pub repo: Option<RepoSpec>,
    pub base_uri: Option<String>,
}

impl Mount {
    pub fn new(repo: RepoSpec, base_uri: impl Into<String>) -> Self {
        Self {
            repo: Some(repo),
            base_uri: Some(base_uri.into()),
        }
    }
}
