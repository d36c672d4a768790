use crate::models::AppSettings;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `<config dir>/citelens/settings.json`
pub fn settings_path() -> Result<PathBuf, String> {
    let config_dir = dirs::config_dir()
        .ok_or("Could not find config directory")?
        .join("citelens");

    Ok(config_dir.join("settings.json"))
}

/// Load settings from `path`, falling back to defaults when the file is absent
pub fn read_settings(path: &Path) -> Result<AppSettings, String> {
    if !path.exists() {
        debug!("No settings file at {:?}, using defaults", path);
        return Ok(AppSettings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read settings: {}", e))?;

    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse settings: {}", e))
}

/// Write settings to `path`, creating parent directories
pub fn write_settings(path: &Path, settings: &AppSettings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory: {}", e))?;
    }

    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;

    fs::write(path, content)
        .map_err(|e| format!("Failed to write settings: {}", e))
}

/// Stored settings with environment overrides applied
pub fn get_settings() -> Result<AppSettings, String> {
    let settings = read_settings(&settings_path()?)?;
    Ok(settings.with_env_overrides())
}

/// Write the stored settings back to `path` with every field filled in.
/// Environment overrides are not persisted.
pub fn init_settings(path: &Path) -> Result<AppSettings, String> {
    let settings = read_settings(path)?;
    write_settings(path, &settings)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("citelens-test-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = read_settings(&temp_path("settings.json")).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_write_then_read() {
        let path = temp_path("settings.json");
        let mut settings = AppSettings::default();
        settings.openalex_mailto = Some("lab@example.org".to_string());
        settings.works_per_page = 50;

        write_settings(&path, &settings).unwrap();
        let loaded = read_settings(&path).unwrap();
        assert_eq!(loaded, settings);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_init_settings_keeps_stored_values_only() {
        let path = temp_path("settings.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"works_per_page": 25}"#).unwrap();

        std::env::set_var("OPENALEX_MAILTO", "transient@example.org");
        let written = init_settings(&path);
        std::env::remove_var("OPENALEX_MAILTO");
        let written = written.unwrap();

        assert_eq!(written.works_per_page, 25);
        assert_eq!(written.openalex_mailto, None);
        assert_eq!(read_settings(&path).unwrap(), written);
        assert!(!fs::read_to_string(&path).unwrap().contains("transient"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let path = temp_path("settings.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let err = read_settings(&path).unwrap_err();
        assert!(err.starts_with("Failed to parse settings"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
