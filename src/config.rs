use std::path::{Path, PathBuf};

use egui::{Pos2, Vec2};
use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::PaddockError;

const CONFIG_DIR_NAME: &str = "paddock";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_API_BASE_URL: &str = "https://ergast.com/api/f1";
pub const DEFAULT_SEASON: &str = "current";
pub const DEFAULT_HEADSHOT_URL_TEMPLATE: &str = "https://www.formula1.com/content/fom-website/en/drivers/{slug}/jcr:content/image.img.1920.medium.jpg/1677069223130.jpg";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowPosition {
    pub x: f32,
    pub y: f32,
}

impl Default for WindowPosition {
    fn default() -> Self {
        Self { x: 100., y: 100. }
    }
}

impl From<WindowPosition> for Pos2 {
    fn from(value: WindowPosition) -> Self {
        Pos2::new(value.x, value.y)
    }
}

impl From<Pos2> for WindowPosition {
    fn from(value: Pos2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the Ergast-compatible API, without trailing slash
    pub api_base_url: String,
    /// Season path segment: a year or "current"
    pub season: String,
    /// Headshot URL with a `{slug}` placeholder
    pub headshot_url_template: String,
    pub window_position: WindowPosition,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            season: DEFAULT_SEASON.to_string(),
            headshot_url_template: DEFAULT_HEADSHOT_URL_TEMPLATE.to_string(),
            window_position: WindowPosition::default(),
            window_size: [900., 600.],
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        Some(
            dirs::config_dir()?
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        )
    }

    /// Reads the config from the user config directory. A missing or
    /// unreadable file yields `None`.
    pub fn from_local_file() -> Option<Self> {
        Self::from_file(&Self::default_path()?)
    }

    pub fn from_file(config_path: &Path) -> Option<Self> {
        if !config_path.exists() {
            return None;
        }
        let file = match std::fs::File::open(config_path) {
            Ok(file) => file,
            Err(e) => {
                error!("Could not open config file {:?}: {}", config_path, e);
                return None;
            }
        };
        match serde_json::from_reader(file) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring unparseable config file {:?}: {}", config_path, e);
                None
            }
        }
    }

    /// Settings for a single run. The API root and season given on the
    /// command line replace the stored ones; `self` is left as it was so the
    /// file never picks them up.
    pub fn with_overrides(&self, api_base_url: Option<String>, season: Option<String>) -> Self {
        let mut run_config = self.clone();
        if let Some(api_base_url) = api_base_url {
            run_config.api_base_url = api_base_url;
        }
        if let Some(season) = season {
            run_config.season = season;
        }
        run_config
    }

    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_size[0], self.window_size[1])
    }

    pub fn save(&self) -> Result<(), PaddockError> {
        let config_path = Self::default_path().ok_or(PaddockError::NoConfigDir)?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), PaddockError> {
        if let Some(parent) = config_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| PaddockError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| PaddockError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| PaddockError::ConfigSerializeError { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        assert!(AppConfig::from_file(&temp_dir.path().join("config.json")).is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let config = AppConfig {
            season: "2021".to_string(),
            window_position: WindowPosition { x: 12., y: 34. },
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"season":"2008"}"#).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded.season, "2008");
        assert_eq!(loaded.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(loaded.headshot_url_template, DEFAULT_HEADSHOT_URL_TEMPLATE);
    }

    #[test]
    fn test_overrides_are_not_saved() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        AppConfig {
            season: "2021".to_string(),
            ..Default::default()
        }
        .save_to(&path)
        .unwrap();

        let mut stored = AppConfig::from_file(&path).unwrap();
        let run_config = stored.with_overrides(
            Some("http://localhost:8000/f1".to_string()),
            Some("2008".to_string()),
        );
        assert_eq!(run_config.season, "2008");
        assert_eq!(run_config.api_base_url, "http://localhost:8000/f1");

        stored.window_position = WindowPosition { x: 40., y: 60. };
        stored.save_to(&path).unwrap();

        let reloaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(reloaded.season, "2021");
        assert_eq!(reloaded.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(reloaded.window_position, WindowPosition { x: 40., y: 60. });
    }

    #[test]
    fn test_without_overrides_run_matches_file() {
        let stored = AppConfig::default();
        assert_eq!(stored.with_overrides(None, None), stored);
    }

    #[test]
    fn test_garbage_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(AppConfig::from_file(&path).is_none());
    }
}
