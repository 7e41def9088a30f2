//! Settings file discovery and loading.
//!
//! A settings file is looked up in this order, first hit wins:
//! 1. An explicit path (`--settings` / `GPROV_SETTINGS`)
//! 2. `gprov.yaml` in the working directory
//! 3. `~/.gprov/settings.yaml`
//!
//! When no file is found the settings are empty.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::settings::schema::RawSettings;

/// Name of the per-directory settings file.
pub const PROJECT_SETTINGS_FILE: &str = "gprov.yaml";

/// Directory under the home directory holding user settings.
pub const USER_SETTINGS_DIR: &str = ".gprov";

/// Name of the user settings file.
pub const USER_SETTINGS_FILE: &str = "settings.yaml";

/// Settings together with the file they came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsSource {
    /// The file that was loaded, if any.
    pub path: Option<PathBuf>,
    /// Parsed settings.
    pub settings: RawSettings,
}

/// Loads provider settings from YAML.
///
/// # Examples
///
/// ```no_run
/// use gprov::settings::SettingsLoader;
/// use std::path::Path;
///
/// let source = SettingsLoader::load(None, Path::new(".")).unwrap();
/// if let Some(path) = &source.path {
///     println!("loaded {}", path.display());
/// }
/// ```
pub struct SettingsLoader;

impl SettingsLoader {
    /// Discover and load settings using the real home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or if any selected
    /// file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<SettingsSource> {
        Self::discover(explicit, working_dir, home::home_dir().as_deref())
    }

    /// Discover and load settings with an explicit home directory.
    ///
    /// # Errors
    ///
    /// Same as [`SettingsLoader::load`].
    pub fn discover(
        explicit: Option<&Path>,
        working_dir: &Path,
        home_dir: Option<&Path>,
    ) -> Result<SettingsSource> {
        if let Some(path) = explicit {
            log::debug!("loading settings from {}", path.display());
            return Ok(SettingsSource {
                path: Some(path.to_path_buf()),
                settings: Self::load_file(path)?,
            });
        }

        let candidates = [
            Some(working_dir.join(PROJECT_SETTINGS_FILE)),
            home_dir.map(Self::user_settings_path),
        ];
        for candidate in candidates.into_iter().flatten() {
            if candidate.is_file() {
                log::debug!("loading settings from {}", candidate.display());
                let settings = Self::load_file(&candidate)?;
                return Ok(SettingsSource {
                    path: Some(candidate),
                    settings,
                });
            }
        }

        log::debug!("no settings file found, using empty settings");
        Ok(SettingsSource::default())
    }

    /// Load and parse one YAML settings file.
    ///
    /// An empty file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be read and
    /// [`crate::Error::Configuration`] if the YAML is invalid or has unknown
    /// fields.
    pub fn load_file(path: &Path) -> Result<RawSettings> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] for invalid YAML.
    ///
    /// # Examples
    ///
    /// ```
    /// use gprov::settings::SettingsLoader;
    ///
    /// let settings = SettingsLoader::parse("zone: us-east1-b\n").unwrap();
    /// assert_eq!(settings.zone.as_deref(), Some("us-east1-b"));
    /// ```
    pub fn parse(contents: &str) -> Result<RawSettings> {
        if contents.trim().is_empty() {
            return Ok(RawSettings::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Path of the user settings file under `home_dir`.
    #[must_use]
    pub fn user_settings_path(home_dir: &Path) -> PathBuf {
        home_dir.join(USER_SETTINGS_DIR).join(USER_SETTINGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = SettingsLoader::load_file(Path::new("/nonexistent/path/gprov.yaml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "project: [unclosed\n").unwrap();
        assert!(matches!(
            SettingsLoader::load_file(&path),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(SettingsLoader::load_file(&path).unwrap(), RawSettings::default());
    }

    #[test]
    fn test_explicit_path_wins() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(PROJECT_SETTINGS_FILE), "project: local\n").unwrap();
        let explicit = temp_dir.path().join("other.yaml");
        fs::write(&explicit, "project: explicit\n").unwrap();

        let source =
            SettingsLoader::discover(Some(&explicit), temp_dir.path(), None).unwrap();
        assert_eq!(source.path.as_deref(), Some(explicit.as_path()));
        assert_eq!(source.settings.project.as_deref(), Some("explicit"));
    }

    #[test]
    fn test_explicit_missing_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.yaml");
        assert!(SettingsLoader::discover(Some(&missing), temp_dir.path(), None).is_err());
    }

    #[test]
    fn test_project_file_before_user_file() {
        let work = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        fs::write(work.path().join(PROJECT_SETTINGS_FILE), "project: local\n").unwrap();
        let user_path = SettingsLoader::user_settings_path(home.path());
        fs::create_dir_all(user_path.parent().unwrap()).unwrap();
        fs::write(&user_path, "project: user\n").unwrap();

        let source = SettingsLoader::discover(None, work.path(), Some(home.path())).unwrap();
        assert_eq!(source.settings.project.as_deref(), Some("local"));
    }

    #[test]
    fn test_user_file_fallback() {
        let work = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let user_path = SettingsLoader::user_settings_path(home.path());
        fs::create_dir_all(user_path.parent().unwrap()).unwrap();
        fs::write(&user_path, "region: europe-west1\n").unwrap();

        let source = SettingsLoader::discover(None, work.path(), Some(home.path())).unwrap();
        assert_eq!(source.path, Some(user_path));
        assert_eq!(source.settings.region.as_deref(), Some("europe-west1"));
    }

    #[test]
    fn test_nothing_found_is_empty() {
        let work = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let source = SettingsLoader::discover(None, work.path(), Some(home.path())).unwrap();
        assert_eq!(source, SettingsSource::default());
    }
}
