use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::filter::ValidityRule;

/// Optional settings file read from the working directory.
pub const CONFIG_FILE: &str = "skytrace.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Settings the viewer reads once at startup.  Every field has a default,
/// so a partial (or absent) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root directory whose subfolders are selectable.
    pub data_dir: PathBuf,
    /// Status predicate separating valid from invalid rows.
    pub validity: ValidityRule,
    /// Marker radius for the weakest detection, in points.
    pub base_point_size: f32,
    /// Marker radius for the strongest detection.
    pub max_point_size: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: PathBuf::from("data"),
            validity: ValidityRule::default(),
            base_point_size: 2.5,
            max_point_size: 9.0,
        }
    }
}

impl AppConfig {
    /// Read `skytrace.json` if present; fall back to defaults on a missing
    /// file, and warn (but still fall back) on a malformed or unreadable one.
    pub fn load_or_default() -> Self {
        Self::load_from(std::path::Path::new(CONFIG_FILE))
    }

    fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(cfg) => {
                    log::info!("loaded settings from {}", path.display());
                    cfg
                }
                Err(e) => {
                    log::warn!("{} is malformed ({e}); using defaults", path.display());
                    AppConfig::default()
                }
            },
            // Absent file is the normal case; anything else (permissions,
            // I/O) still deserves a warning before falling back.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
            Err(e) => {
                log::warn!("could not read {} ({e}); using defaults", path.display());
                AppConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_in_defaults() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{ "data_dir": "captures" }"#).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("captures"));
        assert_eq!(cfg.validity, ValidityRule::default());
        assert_eq!(cfg.base_point_size, AppConfig::default().base_point_size);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "skytrace-config-missing-{}.json",
            std::process::id()
        ));
        let cfg = AppConfig::load_from(&path);
        assert_eq!(cfg.data_dir, AppConfig::default().data_dir);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "skytrace-config-malformed-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();
        let cfg = AppConfig::load_from(&path);
        assert_eq!(cfg.validity, ValidityRule::default());
    }

    #[test]
    fn validity_rule_round_trips_through_json() {
        let cfg = AppConfig {
            validity: ValidityRule::InvalidSentinel("0".to_string()),
            ..AppConfig::default()
        };
        let text = serde_json::to_string(&cfg).unwrap();
        let back: AppConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.validity, cfg.validity);
    }
}
