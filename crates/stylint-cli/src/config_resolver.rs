//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `stylint.toml` or `.stylint.toml` in the linted directory or the
//!    nearest ancestor that has one
//! 3. `~/.stylint/config.toml` (global fallback)
//! 4. No config found → defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory or one of its ancestors.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.stylint/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["stylint.toml", ".stylint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let start = std::fs::canonicalize(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());
    for dir in start.ancestors() {
        if let Some(found) = project_config_in(dir) {
            tracing::debug!("Found project config: {}", found.display());
            return ConfigSource::Project(found);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

fn project_config_in(dir: &Path) -> Option<PathBuf> {
    PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Returns the global config directory path.
///
/// Resolution: `$STYLINT_CONFIG_DIR` > `~/.stylint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("STYLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".stylint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn canonical(tmp: &TempDir) -> PathBuf {
        fs::canonicalize(tmp.path()).expect("temp dir resolves")
    }

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().expect("temp dir");
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "").expect("write");
        fs::write(tmp.path().join("stylint.toml"), "").expect("write");

        let result = resolve_inner(tmp.path(), Some(&explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn explicit_does_not_check_existence() {
        let result = resolve_inner(
            Path::new("/tmp"),
            Some(Path::new("/nonexistent.toml")),
            None,
        );
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn stylint_toml_preferred_over_dot_prefix() {
        let tmp = TempDir::new().expect("temp dir");
        fs::write(tmp.path().join("stylint.toml"), "").expect("write");
        fs::write(tmp.path().join(".stylint.toml"), "").expect("write");

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(&tmp).join("stylint.toml"))
        );
    }

    #[test]
    fn dot_prefixed_config_found() {
        let tmp = TempDir::new().expect("temp dir");
        fs::write(tmp.path().join(".stylint.toml"), "").expect("write");

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(&tmp).join(".stylint.toml"))
        );
    }

    #[test]
    fn nearest_ancestor_config_wins() {
        let tmp = TempDir::new().expect("temp dir");
        let nested = tmp.path().join("Sources").join("App");
        fs::create_dir_all(&nested).expect("mkdir");
        fs::write(tmp.path().join("stylint.toml"), "").expect("write");

        let result = resolve_inner(&nested, None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(&tmp).join("stylint.toml"))
        );
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().expect("temp dir");
        let global = TempDir::new().expect("temp dir");
        fs::write(global.path().join("config.toml"), "").expect("write");

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
    }

    #[test]
    fn global_skipped_when_project_config_exists() {
        let project = TempDir::new().expect("temp dir");
        fs::write(project.path().join("stylint.toml"), "").expect("write");
        let global = TempDir::new().expect("temp dir");
        fs::write(global.path().join("config.toml"), "").expect("write");

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn config_source_path_and_global_flag() {
        let p = PathBuf::from("/tmp/test.toml");
        assert!(ConfigSource::Default.path().is_none());
        assert_eq!(ConfigSource::Project(p.clone()).path(), Some(p.as_path()));
        assert!(ConfigSource::Global(p.clone()).is_global());
        assert!(!ConfigSource::Explicit(p).is_global());
    }
}
