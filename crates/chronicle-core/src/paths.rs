//! Base and log directory resolution
//!
//! Each directory is resolved on first use and cached for the lifetime of
//! the resolver. Resolution order for an unset directory:
//!
//! 1. an explicit path from the caller, used verbatim
//! 2. `<envRoot>/.app/<name>` when an environment manager is active
//! 3. `/var/<name>` for root, `~/.<name>` otherwise
//!
//! The log directory follows the same order with its own defaults
//! (`.../log`, `/var/log/<name>`), and never derives from the base directory.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::*;
use crate::environment::EnvironmentLocator;
use crate::privilege::PrivilegeOracle;

/// Resolves and caches the directories used by one logger
pub struct PathResolver {
    name: String,
    privilege: Box<dyn PrivilegeOracle>,
    environment: Box<dyn EnvironmentLocator>,
    base_dir: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

impl PathResolver {
    pub fn new(
        name: impl Into<String>,
        privilege: Box<dyn PrivilegeOracle>,
        environment: Box<dyn EnvironmentLocator>,
    ) -> Self {
        Self {
            name: name.into(),
            privilege,
            environment,
            base_dir: None,
            log_dir: None,
        }
    }

    /// Resolve the base directory, replacing the cached value when `explicit` is non-empty
    pub fn resolve_base_dir(&mut self, explicit: Option<&Path>) -> &Path {
        let dir = match (non_empty(explicit), self.base_dir.take()) {
            (Some(explicit), _) => explicit.to_path_buf(),
            (None, Some(cached)) => cached,
            (None, None) => {
                let dir = self.default_base_dir();
                debug!("Resolved base dir: {}", dir.display());
                dir
            }
        };
        self.base_dir.insert(dir).as_path()
    }

    /// Resolve the log directory, replacing the cached value when `explicit` is non-empty
    pub fn resolve_log_dir(&mut self, explicit: Option<&Path>) -> &Path {
        let dir = match (non_empty(explicit), self.log_dir.take()) {
            (Some(explicit), _) => explicit.to_path_buf(),
            (None, Some(cached)) => cached,
            (None, None) => {
                let dir = self.default_log_dir();
                debug!("Resolved log dir: {}", dir.display());
                dir
            }
        };
        self.log_dir.insert(dir).as_path()
    }

    pub fn base_dir(&mut self) -> &Path {
        self.resolve_base_dir(None)
    }

    pub fn log_dir(&mut self) -> &Path {
        self.resolve_log_dir(None)
    }

    /// Override the base directory; an empty path clears it for lazy resolution
    pub fn set_base_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        self.base_dir = (!dir.as_os_str().is_empty()).then_some(dir);
    }

    /// Override the log directory; an empty path clears it for lazy resolution
    pub fn set_log_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        self.log_dir = (!dir.as_os_str().is_empty()).then_some(dir);
    }

    pub fn is_base_dir_resolved(&self) -> bool {
        self.base_dir.is_some()
    }

    pub fn is_log_dir_resolved(&self) -> bool {
        self.log_dir.is_some()
    }

    pub fn privilege(&self) -> &dyn PrivilegeOracle {
        self.privilege.as_ref()
    }

    fn default_base_dir(&self) -> PathBuf {
        if let Some(root) = self.environment.active_environment_root() {
            return root.join(ENV_APP_DIR).join(&self.name);
        }
        if self.privilege.is_root() {
            Path::new(SYSTEM_BASE_ROOT).join(&self.name)
        } else {
            self.user_home_dir()
        }
    }

    fn default_log_dir(&self) -> PathBuf {
        if let Some(root) = self.environment.active_environment_root() {
            return root.join(ENV_APP_DIR).join(&self.name).join(LOG_SUBDIR);
        }
        if self.privilege.is_root() {
            Path::new(SYSTEM_LOG_ROOT).join(&self.name)
        } else {
            self.user_home_dir().join(LOG_SUBDIR)
        }
    }

    fn user_home_dir(&self) -> PathBuf {
        let dot_dir = format!(".{}", self.name);
        dirs::home_dir()
            .map(|h| h.join(&dot_dir))
            .unwrap_or_else(|| PathBuf::from(dot_dir))
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
