//! Fixed-user directory

use async_trait::async_trait;

use issues_core::{RepoResult, RequestContext, User, UserDirectory};

/// Reports the same user for every request, whatever credential it carries.
///
/// Used for single-user deployments and as a test double.
#[derive(Debug, Clone)]
pub struct StaticUserDirectory {
    user: User,
}

impl StaticUserDirectory {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// A directory in which nobody is ever signed in
    pub fn anonymous() -> Self {
        Self::new(User::anonymous())
    }

    pub fn user(&self) -> &User {
        &self.user
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn get_authenticated(&self, _ctx: &RequestContext) -> RepoResult<User> {
        Ok(self.user.clone())
    }
}
