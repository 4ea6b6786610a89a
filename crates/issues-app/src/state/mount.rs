//! Mount resolution

use issues_common::MountConfig;
use issues_core::{Mount, RepoSpec};

/// Supplies the repository and base URI the tracker serves.
///
/// An embedding application may serve several repositories from one router
/// by resolving per request; the standalone server uses a fixed mount.
pub trait MountResolver: Send + Sync {
    fn resolve(&self) -> Mount;
}

/// The same mount for every request
#[derive(Debug, Clone, Default)]
pub struct StaticMount {
    mount: Mount,
}

impl StaticMount {
    pub fn new(mount: Mount) -> Self {
        Self { mount }
    }
}

impl From<&MountConfig> for StaticMount {
    fn from(config: &MountConfig) -> Self {
        Self::new(Mount {
            repo: config.repo.clone().map(RepoSpec::new),
            base_uri: config.base_uri.clone(),
        })
    }
}

impl MountResolver for StaticMount {
    fn resolve(&self) -> Mount {
        self.mount.clone()
    }
}
