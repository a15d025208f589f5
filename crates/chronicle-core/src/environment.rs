//! Detection of an active environment manager (conda, pyenv-virtualenv, venv)
//!
//! When one is active, per-app directories live inside its root instead of
//! the user's home or the system tree.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Locates the root of the active environment, if any
pub trait EnvironmentLocator {
    fn active_environment_root(&self) -> Option<PathBuf>;
}

/// Locator reading the process environment and the manager CLIs
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl EnvironmentLocator for SystemEnvironment {
    fn active_environment_root(&self) -> Option<PathBuf> {
        locate(|key| std::env::var(key).ok(), run_tool)
    }
}

/// Locator with a fixed answer
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    pub root: Option<PathBuf>,
}

impl StaticEnvironment {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl EnvironmentLocator for StaticEnvironment {
    fn active_environment_root(&self) -> Option<PathBuf> {
        self.root.clone()
    }
}

/// Resolve the active environment root.
///
/// Precedence is conda, then pyenv-virtualenv, then a plain venv.
/// `lookup` reads environment variables, `tool` runs a manager CLI and
/// returns its stdout.
pub fn locate<V, T>(lookup: V, tool: T) -> Option<PathBuf>
where
    V: Fn(&str) -> Option<String>,
    T: Fn(&str, &[&str]) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(prefix) = var("CONDA_PREFIX") {
        return Some(PathBuf::from(prefix));
    }
    if let Some(env) = var("CONDA_DEFAULT_ENV") {
        if Path::new(&env).is_absolute() {
            return Some(PathBuf::from(env));
        }
        if let Some(path) = tool("conda", &["env", "list"])
            .as_deref()
            .and_then(parse_conda_env_list)
            .filter(|p| p.exists())
        {
            return Some(path);
        }
    }

    if let Some(venv) = var("PYENV_VIRTUAL_ENV") {
        return Some(PathBuf::from(venv));
    }
    // Covers `pyenv local` and `pyenv global` as well as PYENV_VERSION
    if let Some(path) = tool("pyenv", &["versions"])
        .as_deref()
        .and_then(parse_pyenv_versions)
        .filter(|p| p.exists())
    {
        return Some(path);
    }

    var("VIRTUAL_ENV").map(PathBuf::from)
}

/// Extract the active virtualenv target from `pyenv versions` output.
///
/// The active line is marked with `*` and points at its env with `-->`:
/// `* build --> /home/u/.pyenv/versions/3.12.12/envs/build (set by ...)`
pub fn parse_pyenv_versions(output: &str) -> Option<PathBuf> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('*'))
        .find_map(|line| {
            let (_, target) = line.split_once("-->")?;
            let target = target.split(" (").next()?.trim();
            (!target.is_empty()).then(|| PathBuf::from(target))
        })
}

/// Extract the active environment path from `conda env list` output
pub fn parse_conda_env_list(output: &str) -> Option<PathBuf> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .find_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.contains(&"*") {
                fields.last().map(PathBuf::from)
            } else {
                None
            }
        })
}

fn run_tool(program: &str, args: &[&str]) -> Option<String> {
    let path = which::which(program).ok()?;
    match Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
    {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            debug!("{} exited with {}", program, output.status);
            None
        }
        Err(e) => {
            debug!("Failed to run {}: {}", program, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn no_tools(_: &str, _: &[&str]) -> Option<String> {
        None
    }

    #[test]
    fn test_no_environment() {
        assert_eq!(locate(vars(&[]), no_tools), None);
    }

    #[test]
    fn test_venv() {
        let root = locate(vars(&[("VIRTUAL_ENV", "/mock/venv")]), no_tools);
        assert_eq!(root, Some(PathBuf::from("/mock/venv")));
    }

    #[test]
    fn test_conda_takes_priority() {
        let root = locate(
            vars(&[
                ("VIRTUAL_ENV", "/mock/venv"),
                ("CONDA_DEFAULT_ENV", "/mock/conda/envs/test"),
            ]),
            no_tools,
        );
        assert_eq!(root, Some(PathBuf::from("/mock/conda/envs/test")));
    }

    #[test]
    fn test_conda_prefix_beats_env_name() {
        let root = locate(
            vars(&[("CONDA_PREFIX", "/opt/conda"), ("CONDA_DEFAULT_ENV", "base")]),
            no_tools,
        );
        assert_eq!(root, Some(PathBuf::from("/opt/conda")));
    }

    #[test]
    fn test_pyenv_virtualenv_beats_venv() {
        let root = locate(
            vars(&[
                ("VIRTUAL_ENV", "/mock/venv"),
                ("PYENV_VIRTUAL_ENV", "/mock/pyenv/envs/build"),
            ]),
            no_tools,
        );
        assert_eq!(root, Some(PathBuf::from("/mock/pyenv/envs/build")));
    }

    #[test]
    fn test_pyenv_versions_lookup_requires_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().display().to_string();
        let tool = move |program: &str, _: &[&str]| {
            assert_eq!(program, "pyenv");
            Some(format!("  system\n* build --> {} (set by PYENV_VERSION)\n", target))
        };
        let root = locate(vars(&[("PYENV_VERSION", "build")]), tool);
        assert_eq!(root, Some(dir.path().to_path_buf()));

        let missing = |_: &str, _: &[&str]| Some("* build --> /does/not/exist".to_string());
        assert_eq!(locate(vars(&[("PYENV_VERSION", "build")]), missing), None);
    }

    #[test]
    fn test_pyenv_local_version_without_variables() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().display().to_string();
        let tool = move |program: &str, _: &[&str]| {
            (program == "pyenv").then(|| {
                format!("  system\n* build --> {} (set by /proj/.python-version)\n", target)
            })
        };
        assert_eq!(locate(vars(&[]), tool), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_venv_used_when_pyenv_has_no_virtualenv() {
        let tool = |_: &str, _: &[&str]| Some("* 3.12.12 (set by /home/u/.pyenv/version)\n".to_string());
        let root = locate(vars(&[("VIRTUAL_ENV", "/mock/venv")]), tool);
        assert_eq!(root, Some(PathBuf::from("/mock/venv")));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        assert_eq!(locate(vars(&[("VIRTUAL_ENV", "  ")]), no_tools), None);
    }

    #[test]
    fn test_parse_pyenv_versions() {
        let output = "  system\n  3.12.12\n* build --> /home/user/.pyenv/versions/3.12.12/envs/build (set by PYENV_VERSION)";
        assert_eq!(
            parse_pyenv_versions(output),
            Some(PathBuf::from("/home/user/.pyenv/versions/3.12.12/envs/build"))
        );
        assert_eq!(parse_pyenv_versions("* 3.12.12 (set by /home/u/.python-version)"), None);
    }

    #[test]
    fn test_parse_conda_env_list() {
        let output = "# conda environments:\n#\nbase                 *   /home/user/miniconda3\ntest                     /home/user/miniconda3/envs/test";
        assert_eq!(
            parse_conda_env_list(output),
            Some(PathBuf::from("/home/user/miniconda3"))
        );
        assert_eq!(parse_conda_env_list("# conda environments:\n"), None);
    }

    #[test]
    fn test_static_environment() {
        assert_eq!(StaticEnvironment::none().active_environment_root(), None);
        assert_eq!(
            StaticEnvironment::at("/env").active_environment_root(),
            Some(PathBuf::from("/env"))
        );
    }
}
