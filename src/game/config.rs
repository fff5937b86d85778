use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use super::input::{GameAction, KeyBind, default_bindings};
use crate::hanoi::animation::ticks_per_move;
use crate::hanoi::error::HanoiError;

pub const MIN_DISKS: u32 = 1;
pub const MAX_DISKS: u32 = 15;
/// Narrower boards would make the disk widths stop shrinking with index.
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
/// Shortest board that still fits the tallest pole and its lift ceiling.
pub const MIN_WINDOW_HEIGHT: f32 = 580.0;

/// Accepts disk counts in `MIN_DISKS..=MAX_DISKS`.
pub fn validate_disk_count(count: u32) -> Result<u32, HanoiError> {
    if (MIN_DISKS..=MAX_DISKS).contains(&count) {
        Ok(count)
    } else {
        Err(HanoiError::DiskCount(count))
    }
}

/// Like `validate_disk_count`, but clamps into range with a warning.
pub fn clamp_disk_count(count: u32) -> u32 {
    match validate_disk_count(count) {
        Ok(count) => count,
        Err(e) => {
            log::warn!("{e}; clamping");
            count.clamp(MIN_DISKS, MAX_DISKS)
        }
    }
}

/// Disk count from the optional command-line argument. A missing or
/// unparsable argument falls back to the configured `initial_disks`.
pub fn resolve_disk_count(arg: Option<&str>, gameplay: &GameplayConfig) -> u32 {
    let Some(arg) = arg else {
        return gameplay.initial_disks();
    };
    match arg.trim().parse::<u32>() {
        Ok(count) => clamp_disk_count(count),
        Err(e) => {
            log::warn!("ignoring disk count argument {arg:?}: {e}");
            gameplay.initial_disks()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HanoiConfig {
    pub key_bindings: HashMap<GameAction, KeyBind>,
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub gameplay: GameplayConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

/// Size of the board area in logical points. The control panel is
/// added below it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl WindowConfig {
    /// Raises a too-small (or non-numeric) dimension to its minimum.
    pub fn validated(self) -> Self {
        Self {
            width: at_least("window.width", self.width, MIN_WINDOW_WIDTH),
            height: at_least("window.height", self.height, MIN_WINDOW_HEIGHT),
        }
    }
}

fn at_least(name: &str, value: f32, min: f32) -> f32 {
    if value >= min {
        value
    } else {
        log::warn!("{name} = {value} is below {min}; using {min}");
        min
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Fixed simulation ticks per second.
    pub tick_rate: u32,
    /// Wall-clock duration of one move.
    pub move_seconds: f64,
}

impl AnimationConfig {
    pub fn ticks_per_move(&self) -> u32 {
        ticks_per_move(self.move_seconds, self.tick_rate)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameplayConfig {
    pub initial_disks: u32,
}

impl GameplayConfig {
    /// `initial_disks`, clamped into range with a warning if needed.
    pub fn initial_disks(&self) -> u32 {
        clamp_disk_count(self.initial_disks)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log every move as it starts.
    #[serde(default = "default_true")]
    pub log_moves: bool,
    #[serde(default)]
    pub show_fps: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_moves: true,
            show_fps: false,
        }
    }
}

impl Default for HanoiConfig {
    fn default() -> Self {
        Self {
            key_bindings: default_bindings(),
            window: WindowConfig {
                width: 900.0,
                height: 600.0,
            },
            animation: AnimationConfig {
                tick_rate: 60,
                move_seconds: 100.0 / 60.0,
            },
            gameplay: GameplayConfig {
                initial_disks: 3,
            },
            debug: DebugConfig::default(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "torre-hanoi")
        .map(|dirs| dirs.config_dir().join("settings.toml"))
}

impl HanoiConfig {
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Reads `path`, writing defaults there if it does not exist yet.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                match toml::from_str::<Self>(&contents) {
                    Ok(mut config) => {
                        config.window = config.window.validated();
                        config
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config: {e}. Using defaults.");
                        Self::default()
                    }
                }
            }
            Err(_) => {
                let config = Self::default();
                config.save_to(path);
                config
            }
        }
    }

    pub fn save(&self) {
        let Some(path) = config_path() else {
            log::warn!("Could not determine config directory");
            return;
        };
        self.save_to(&path);
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Failed to create config directory: {e}");
                return;
            }
        }

        match toml::to_string_pretty(self) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(path, contents) {
                    log::warn!("Failed to write config: {e}");
                } else {
                    log::info!("settings saved to {}", path.display());
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize config: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HanoiConfig::default();
        assert_eq!(config.window.width, 900.0);
        assert_eq!(config.window.height, 600.0);
        assert_eq!(config.gameplay.initial_disks(), 3);
        assert_eq!(config.animation.ticks_per_move(), 100);
        assert!(config.debug.log_moves);
        assert!(!config.key_bindings.is_empty());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = HanoiConfig::default();
        let serialized = toml::to_string_pretty(&config).expect("serialize");
        let deserialized: HanoiConfig = toml::from_str(&serialized).expect("deserialize");
        assert_eq!(deserialized.window.width, config.window.width);
        assert_eq!(deserialized.animation.tick_rate, config.animation.tick_rate);
        assert_eq!(deserialized.animation.ticks_per_move(), 100);
        assert_eq!(deserialized.gameplay.initial_disks, config.gameplay.initial_disks);
        assert_eq!(deserialized.key_bindings, config.key_bindings);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.toml");
        let config = HanoiConfig::load_from(&path);
        assert_eq!(config.gameplay.initial_disks, 3);
        assert!(path.exists());
    }

    #[test]
    fn test_saved_changes_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        let mut config = HanoiConfig::default();
        config.gameplay.initial_disks = 7;
        config.animation.move_seconds = 0.5;
        config.save_to(&path);
        let loaded = HanoiConfig::load_from(&path);
        assert_eq!(loaded.gameplay.initial_disks, 7);
        assert_eq!(loaded.animation.ticks_per_move(), 30);
    }

    #[test]
    fn test_garbage_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "window = 12").expect("write");
        let config = HanoiConfig::load_from(&path);
        assert_eq!(config.window.width, 900.0);
    }

    #[test]
    fn test_disk_count_validation() {
        assert_eq!(validate_disk_count(1), Ok(1));
        assert_eq!(validate_disk_count(15), Ok(15));
        assert_eq!(validate_disk_count(0), Err(HanoiError::DiskCount(0)));
        assert_eq!(validate_disk_count(16), Err(HanoiError::DiskCount(16)));
    }

    #[test]
    fn test_out_of_range_initial_disks_clamped() {
        let high = GameplayConfig { initial_disks: 40 };
        assert_eq!(high.initial_disks(), MAX_DISKS);
        let low = GameplayConfig { initial_disks: 0 };
        assert_eq!(low.initial_disks(), MIN_DISKS);
    }

    #[test]
    fn test_cli_disk_count() {
        let gameplay = GameplayConfig { initial_disks: 4 };
        assert_eq!(resolve_disk_count(None, &gameplay), 4);
        assert_eq!(resolve_disk_count(Some("9"), &gameplay), 9);
        assert_eq!(resolve_disk_count(Some("0"), &gameplay), MIN_DISKS);
        assert_eq!(resolve_disk_count(Some("99"), &gameplay), MAX_DISKS);
    }

    #[test]
    fn test_unparsable_cli_disk_count_uses_config() {
        let gameplay = GameplayConfig { initial_disks: 4 };
        assert_eq!(resolve_disk_count(Some("abc"), &gameplay), 4);
        assert_eq!(resolve_disk_count(Some("-1"), &gameplay), 4);
        assert_eq!(resolve_disk_count(Some(""), &gameplay), 4);
    }

    #[test]
    fn test_small_window_clamped() {
        let window = WindowConfig { width: 100.0, height: 300.0 }.validated();
        assert_eq!(window.width, MIN_WINDOW_WIDTH);
        assert_eq!(window.height, MIN_WINDOW_HEIGHT);
        let nan = WindowConfig { width: f32::NAN, height: 700.0 }.validated();
        assert_eq!(nan.width, MIN_WINDOW_WIDTH);
        assert_eq!(nan.height, 700.0);
    }

    #[test]
    fn test_small_window_in_file_clamped_on_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.toml");
        let mut config = HanoiConfig::default();
        config.window.width = 60.0;
        config.save_to(&path);
        let loaded = HanoiConfig::load_from(&path);
        assert_eq!(loaded.window.width, MIN_WINDOW_WIDTH);
        assert_eq!(loaded.window.height, 600.0);
    }

    #[test]
    fn test_min_window_keeps_board_valid() {
        use crate::hanoi::disk::disk_width;
        use crate::hanoi::layout::Layout;
        let layout = Layout::compute(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT, MAX_DISKS);
        assert!(layout.lift_y >= 0.0);
        assert!(layout.base.max().y <= MIN_WINDOW_HEIGHT);
        for i in 1..MAX_DISKS as usize {
            assert!(disk_width(i, MAX_DISKS, MIN_WINDOW_WIDTH) < disk_width(i - 1, MAX_DISKS, MIN_WINDOW_WIDTH));
        }
    }

    #[test]
    fn test_debug_section_optional() {
        let mut table: toml::Table = toml::from_str(&toml::to_string(&HanoiConfig::default()).unwrap()).unwrap();
        table.remove("debug");
        let config: HanoiConfig = toml::from_str(&toml::to_string(&table).unwrap()).unwrap();
        assert!(config.debug.log_moves);
        assert!(!config.debug.show_fps);
    }
}
