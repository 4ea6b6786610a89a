//! User entity - a snapshot of a person as the tracker displays them

use serde::{Deserialize, Serialize};

/// Identity of a user within a domain (e.g. `github.com`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UserSpec {
    pub id: u64,
    pub domain: String,
}

impl UserSpec {
    pub fn new(id: u64, domain: impl Into<String>) -> Self {
        Self {
            id,
            domain: domain.into(),
        }
    }
}

/// User snapshot stored on comments, events and reactions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub domain: String,
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

impl User {
    pub fn new(spec: UserSpec, login: impl Into<String>) -> Self {
        Self {
            id: spec.id,
            domain: spec.domain,
            login: login.into(),
            avatar_url: String::new(),
            html_url: String::new(),
        }
    }

    /// The anonymous viewer. ID 0 never identifies a real account.
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.id == 0
    }

    pub fn spec(&self) -> UserSpec {
        UserSpec::new(self.id, self.domain.clone())
    }

    /// Same account, regardless of the snapshot's display fields
    pub fn same_as(&self, other: &User) -> bool {
        self.id == other.id && self.domain == other.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous() {
        assert!(User::anonymous().is_anonymous());
        assert!(!User::new(UserSpec::new(1, "example.org"), "gopher").is_anonymous());
    }

    #[test]
    fn test_same_as_ignores_display_fields() {
        let a = User::new(UserSpec::new(1, "example.org"), "gopher");
        let mut b = a.clone();
        b.login = "renamed".into();
        b.avatar_url = "https://example.org/a.png".into();
        assert!(a.same_as(&b));

        let c = User::new(UserSpec::new(1, "other.org"), "gopher");
        assert!(!a.same_as(&c));
    }
}
