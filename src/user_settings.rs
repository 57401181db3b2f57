use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::global_constants;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Dark, ThemeMode::Light];
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "Dark"),
            ThemeMode::Light => write!(f, "Light"),
        }
    }
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Dark
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub backend_base_url: String,
    pub theme_mode: ThemeMode,
    /// Whether picking a new file also clears the previous results. The
    /// original client kept stale results on screen next to a newly
    /// picked, not-yet-uploaded file; off by default to match.
    #[serde(default)]
    pub clear_results_on_new_selection: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            backend_base_url: global_constants::DEFAULT_BACKEND_BASE_URL.to_string(),
            theme_mode: ThemeMode::default(),
            clear_results_on_new_selection: false,
        }
    }
}

impl UserSettings {
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;

        if !settings_path.exists() {
            log::info!("[SETTINGS] No settings file found, using defaults");
            let default_settings = Self::default();
            default_settings.save()?;
            return Ok(default_settings);
        }

        let contents = std::fs::read_to_string(&settings_path)?;
        let settings: UserSettings = serde_json::from_str(&contents)?;

        log::info!("[SETTINGS] Loaded settings from {:?}", settings_path);
        log::debug!("[SETTINGS] Backend base URL: {}", settings.backend_base_url);

        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let settings_path = Self::get_settings_file_path()?;

        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&settings_path, contents)?;

        log::info!("[SETTINGS] Saved settings to {:?}", settings_path);
        Ok(())
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::CONFIG_DIR_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_default_is_dark() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn test_theme_mode_display() {
        assert_eq!(format!("{}", ThemeMode::Dark), "Dark");
        assert_eq!(format!("{}", ThemeMode::Light), "Light");
    }

    #[test]
    fn test_user_settings_default_values() {
        let settings = UserSettings::default();

        assert_eq!(
            settings.backend_base_url,
            global_constants::DEFAULT_BACKEND_BASE_URL
        );
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert!(!settings.clear_results_on_new_selection);
    }

    #[test]
    fn test_user_settings_serialization_roundtrip() {
        let settings = UserSettings {
            backend_base_url: "http://plates.example:8000".to_string(),
            theme_mode: ThemeMode::Light,
            clear_results_on_new_selection: true,
        };

        let serialized = serde_json::to_string(&settings).unwrap();
        let deserialized: UserSettings = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized.backend_base_url, settings.backend_base_url);
        assert_eq!(deserialized.theme_mode, settings.theme_mode);
        assert_eq!(
            deserialized.clear_results_on_new_selection,
            settings.clear_results_on_new_selection
        );
    }

    #[test]
    fn test_user_settings_deserialization_with_missing_clear_flag() {
        let json = r#"{
            "backend_base_url": "http://127.0.0.1:5000",
            "theme_mode": "Dark"
        }"#;

        let settings: UserSettings = serde_json::from_str(json).unwrap();
        assert!(!settings.clear_results_on_new_selection);
    }
}
