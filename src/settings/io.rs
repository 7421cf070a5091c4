use super::AppSettings;
use crate::error::{AppError, AppResult};
use directories_next::ProjectDirs;
use std::fs;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "ConservatorTools";
const APPLICATION: &str = "assessdb";
const CONFIG_FILE: &str = "app_settings.json";

pub fn get_config_path() -> AppResult<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or_else(|| {
            AppError::Configuration("Could not determine project directories for app settings.".into())
        })
}

/// Loads `.env`, then the settings file (explicit path or the project config dir),
/// then applies environment overrides.
pub fn load_settings(explicit: Option<&Path>) -> AppResult<AppSettings> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {:?}", path);
    }
    let config_file = match explicit {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };
    let mut settings = load_settings_from_file(&config_file, explicit.is_some())?;
    settings.apply_env_overrides();
    Ok(settings)
}

pub fn load_settings_from_file(config_file: &Path, required: bool) -> AppResult<AppSettings> {
    debug!("AppSettings: Attempting to load settings from {:?}", config_file);
    match fs::File::open(config_file) {
        Ok(file) => {
            let reader = BufReader::new(file);
            match serde_json::from_reader(reader) {
                Ok(settings) => {
                    info!("AppSettings: Loaded settings from {:?}", config_file);
                    Ok(settings)
                }
                Err(e) => {
                    error!("AppSettings: Failed to parse settings file {:?}: {}", config_file, e);
                    Err(AppError::Configuration(format!(
                        "Failed to parse settings file {}: {}",
                        config_file.display(),
                        e
                    )))
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound && !required => {
            debug!("AppSettings: Settings file not found at {:?}. Using defaults.", config_file);
            Ok(AppSettings::default())
        }
        Err(e) => Err(AppError::Configuration(format!(
            "Failed to open settings file {}: {}",
            config_file.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from_file(&dir.path().join("absent.json"), false).unwrap();
        assert_eq!(settings.time_zone, "+00:00");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_settings_from_file(&dir.path().join("absent.json"), true);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn malformed_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_settings_from_file(&path, false),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn reads_document_and_zone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"document":"/srv/a.db","time_zone":"+10:00"}"#).unwrap();
        let settings = load_settings_from_file(&path, true).unwrap();
        assert_eq!(settings.document.as_deref(), Some("/srv/a.db"));
        assert_eq!(settings.time_zone, "+10:00");
    }
}
