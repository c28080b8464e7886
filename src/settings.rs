use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{
    EngineConfig, GridSize, DEFAULT_POINTS_PER_FOOD, DEFAULT_TICK_INTERVAL_MS,
};

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Smallest accepted grid edge; below this the initial snake plus food do
/// not reliably fit.
pub const MIN_GRID_EDGE: u16 = 4;

/// Largest accepted grid edge, keeping coordinates comfortably in `i32`
/// and the board renderable in a terminal.
pub const MAX_GRID_EDGE: u16 = 100;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid edge {0} is out of range ({MIN_GRID_EDGE}..={MAX_GRID_EDGE})")]
    GridOutOfRange(u16),
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

/// On-disk settings shape; every field optional so users only state what
/// they want to override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub grid_width: Option<u16>,
    pub grid_height: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub points_per_food: Option<u32>,
    pub theme: Option<String>,
}

/// Fully resolved runtime settings: defaults layered under the settings
/// file, layered under CLI overrides.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Settings {
    pub engine: EngineConfig,
    pub tick_interval_ms: u64,
    pub theme_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            theme_name: "classic".to_owned(),
        }
    }
}

/// CLI-level overrides applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub grid_width: Option<u16>,
    pub grid_height: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub points_per_food: Option<u32>,
    pub theme: Option<String>,
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads and resolves settings from the default location.
///
/// A missing file yields pure defaults; a present but unreadable or
/// malformed file is an error, surfaced before the terminal enters raw
/// mode.
pub fn load(overrides: &Overrides) -> Result<Settings, SettingsError> {
    let file = load_file(&settings_path())?;
    resolve(&file, overrides)
}

fn load_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SettingsFile::default()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&raw)?)
}

/// Merges defaults, file values, and CLI overrides, then validates.
pub fn resolve(file: &SettingsFile, overrides: &Overrides) -> Result<Settings, SettingsError> {
    let defaults = Settings::default();

    let width = overrides
        .grid_width
        .or(file.grid_width)
        .unwrap_or(defaults.engine.grid.width);
    let height = overrides
        .grid_height
        .or(file.grid_height)
        .unwrap_or(defaults.engine.grid.height);

    for edge in [width, height] {
        if !(MIN_GRID_EDGE..=MAX_GRID_EDGE).contains(&edge) {
            return Err(SettingsError::GridOutOfRange(edge));
        }
    }

    let theme_name = overrides
        .theme
        .clone()
        .or_else(|| file.theme.clone())
        .unwrap_or(defaults.theme_name);
    if crate::config::theme_by_name(&theme_name).is_none() {
        return Err(SettingsError::UnknownTheme(theme_name));
    }

    Ok(Settings {
        engine: EngineConfig {
            grid: GridSize { width, height },
            points_per_food: overrides
                .points_per_food
                .or(file.points_per_food)
                .unwrap_or(DEFAULT_POINTS_PER_FOOD),
        },
        tick_interval_ms: overrides
            .tick_interval_ms
            .or(file.tick_interval_ms)
            .unwrap_or(DEFAULT_TICK_INTERVAL_MS)
            .max(1),
        theme_name,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{load_file, resolve, Overrides, Settings, SettingsError, SettingsFile};

    #[test]
    fn defaults_match_the_reference_constants() {
        let settings = Settings::default();
        assert_eq!(settings.engine.grid.width, 20);
        assert_eq!(settings.engine.grid.height, 20);
        assert_eq!(settings.tick_interval_ms, 100);
        assert_eq!(settings.engine.points_per_food, 10);
        assert_eq!(settings.theme_name, "classic");
    }

    #[test]
    fn file_values_override_defaults_and_cli_overrides_file() {
        let file = SettingsFile {
            grid_width: Some(30),
            tick_interval_ms: Some(80),
            theme: Some("ocean".to_owned()),
            ..SettingsFile::default()
        };
        let overrides = Overrides {
            grid_width: Some(24),
            ..Overrides::default()
        };

        let settings = resolve(&file, &overrides).expect("settings should resolve");

        assert_eq!(settings.engine.grid.width, 24);
        assert_eq!(settings.engine.grid.height, 20);
        assert_eq!(settings.tick_interval_ms, 80);
        assert_eq!(settings.theme_name, "ocean");
    }

    #[test]
    fn out_of_range_grid_is_rejected() {
        let overrides = Overrides {
            grid_height: Some(2),
            ..Overrides::default()
        };

        assert!(matches!(
            resolve(&SettingsFile::default(), &overrides),
            Err(SettingsError::GridOutOfRange(2))
        ));
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let overrides = Overrides {
            theme: Some("plasma".to_owned()),
            ..Overrides::default()
        };

        assert!(matches!(
            resolve(&SettingsFile::default(), &overrides),
            Err(SettingsError::UnknownTheme(name)) if name == "plasma"
        ));
    }

    #[test]
    fn missing_settings_file_yields_defaults() {
        let path = unique_test_path("missing");
        let file = load_file(&path).expect("missing file should yield defaults");
        let settings =
            resolve(&file, &Overrides::default()).expect("defaults should resolve");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_settings_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(matches!(load_file(&path), Err(SettingsError::Parse(_))));

        cleanup_test_path(&path);
    }

    #[test]
    fn settings_file_round_trips_through_json() {
        let path = unique_test_path("round_trip");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }

        let original = SettingsFile {
            grid_width: Some(16),
            grid_height: Some(12),
            tick_interval_ms: Some(120),
            points_per_food: Some(5),
            theme: Some("neon".to_owned()),
        };
        let json = serde_json::to_string_pretty(&original).expect("serialization succeeds");
        fs::write(&path, json).expect("test file write should succeed");

        let loaded = load_file(&path).expect("load should succeed");
        assert_eq!(loaded.grid_width, Some(16));
        assert_eq!(loaded.tick_interval_ms, Some(120));
        assert_eq!(loaded.theme, Some("neon".to_owned()));

        cleanup_test_path(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
