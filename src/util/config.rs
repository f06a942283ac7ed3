use std::path::Path;

use serde_derive::Deserialize;

use crate::data_types::common::{Error, Result};

/// Startup settings. Every field has a default, so a missing or partial file
/// is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Byte-store key the workout array lives under.
    pub storage_key: String,
    /// Zoom level used when centering on a selected workout.
    pub map_zoom: u32,
    /// Pan animation length for centering, in seconds.
    pub pan_duration_secs: f64,
    /// Delay before a hidden form slot is made displayable again, in millis.
    pub form_reshow_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: "workout".to_string(),
            map_zoom: 13,
            pan_duration_secs: 1.0,
            form_reshow_delay_ms: 1000,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config(e.to_string()))?;

        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config = AppConfig::default();

        assert_eq!(config.storage_key, "workout");
        assert_eq!(config.map_zoom, 13);
        assert_eq!(config.pan_duration_secs, 1.0);
        assert_eq!(config.form_reshow_delay_ms, 1000);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage_key = \"workouts-v2\"").unwrap();
        writeln!(file, "map_zoom = 11").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.storage_key, "workouts-v2");
        assert_eq!(config.map_zoom, 11);
        assert_eq!(config.form_reshow_delay_ms, 1000);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        assert!(matches!(
            AppConfig::from_file(Path::new("/nonexistent/trail-log.toml")),
            Err(Error::Config(_))
        ));
    }
}
