//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the fixture loader.
//! Library code never reads environment variables itself.

use crate::constants::{
    CALLS_FIXTURE, EMAILS_FIXTURE, ENCOUNTER_FIXTURE, FAXES_FIXTURE, SMS_FIXTURE,
};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    fixtures_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `fixtures_dir` of `None` means the fixtures embedded in the binary are used.
    pub fn new(fixtures_dir: Option<PathBuf>) -> CoreResult<Self> {
        let fixtures_dir = fixtures_dir.map(resolve_fixtures_dir).transpose()?;
        Ok(Self { fixtures_dir })
    }

    pub fn fixtures_dir(&self) -> Option<&Path> {
        self.fixtures_dir.as_deref()
    }
}

/// Validate a fixtures directory override.
///
/// The directory must exist and contain every fixture file the loader expects, so a typo in
/// the override fails at startup rather than on the first request.
pub fn resolve_fixtures_dir(dir: PathBuf) -> CoreResult<PathBuf> {
    if !dir.is_dir() {
        return Err(CoreError::InvalidInput(format!(
            "fixtures directory does not exist: {}",
            dir.display()
        )));
    }

    for name in [
        EMAILS_FIXTURE,
        FAXES_FIXTURE,
        SMS_FIXTURE,
        CALLS_FIXTURE,
        ENCOUNTER_FIXTURE,
    ] {
        if !dir.join(name).is_file() {
            return Err(CoreError::InvalidInput(format!(
                "fixtures directory {} is missing {name}",
                dir.display()
            )));
        }
    }

    Ok(dir)
}

/// Parse an optional fixtures directory value taken from the environment.
///
/// Empty or whitespace-only values count as unset.
pub fn fixtures_dir_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_uses_embedded_fixtures() {
        let cfg = CoreConfig::new(None).unwrap();
        assert!(cfg.fixtures_dir().is_none());
    }

    #[test]
    fn rejects_missing_directory() {
        let err = CoreConfig::new(Some(PathBuf::from("/definitely/not/here"))).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("does not exist")));
    }

    #[test]
    fn rejects_directory_without_fixture_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(EMAILS_FIXTURE), "[]").unwrap();

        let err = CoreConfig::new(Some(dir.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains(FAXES_FIXTURE)));
    }

    #[test]
    fn blank_env_value_is_unset() {
        assert_eq!(fixtures_dir_from_env_value(Some("   ".into())), None);
        assert_eq!(fixtures_dir_from_env_value(None), None);
        assert_eq!(
            fixtures_dir_from_env_value(Some(" /srv/fixtures ".into())),
            Some(PathBuf::from("/srv/fixtures"))
        );
    }
}
