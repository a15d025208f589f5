//! Chronicle Core - Shared types, configuration, path resolution and error handling

pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod name;
pub mod paths;
pub mod privilege;
pub mod types;

pub use config::*;
pub use constants::*;
pub use environment::{EnvironmentLocator, StaticEnvironment, SystemEnvironment};
pub use error::{Error, Result};
pub use name::normalize;
pub use paths::PathResolver;
pub use privilege::{PrivilegeOracle, StaticPrivilege, SystemPrivilege};
pub use types::*;
