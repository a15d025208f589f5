//! Privilege detection

use std::process::{Command, Stdio};
use tracing::debug;

/// Reports the privileges the current process runs with
pub trait PrivilegeOracle {
    /// Effective user is root
    fn is_root(&self) -> bool;

    /// Root can be reached through sudo without a password prompt
    fn can_passwordless_elevate(&self) -> bool;
}

/// Oracle backed by the real process credentials
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPrivilege;

impl PrivilegeOracle for SystemPrivilege {
    fn is_root(&self) -> bool {
        nix::unistd::geteuid().is_root()
    }

    fn can_passwordless_elevate(&self) -> bool {
        if self.is_root() {
            return true;
        }

        let sudo = match which::which("sudo") {
            Ok(path) => path,
            Err(_) => return false,
        };

        // -n never prompts; it fails instead when a password would be needed
        match Command::new(sudo)
            .args(["-n", "true"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("sudo probe failed: {}", e);
                false
            }
        }
    }
}

/// Oracle with fixed answers
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPrivilege {
    pub root: bool,
    pub passwordless: bool,
}

impl StaticPrivilege {
    pub fn root() -> Self {
        Self {
            root: true,
            passwordless: true,
        }
    }

    pub fn user() -> Self {
        Self::default()
    }
}

impl PrivilegeOracle for StaticPrivilege {
    fn is_root(&self) -> bool {
        self.root
    }

    fn can_passwordless_elevate(&self) -> bool {
        self.passwordless
    }
}
