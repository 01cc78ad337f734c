//! User settings persisted in `settings.toml`.

use super::common::{Color, colors, load_toml, save_toml};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Frame rate targets cycled with F7.
pub const TARGET_FPS: [u32; 4] = [60, 120, 240, 480];

/// Volume change per wheel notch or arrow key press.
const VOLUME_STEP: f32 = 0.05;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub cursor: CursorSettings,
    pub layout: LayoutSettings,
    pub links: LinkSettings,
}

impl Settings {
    /// Loads settings, falling back to defaults when the file is missing or invalid.
    pub fn load(path: &Path) -> Self {
        match load_toml(path) {
            Ok(settings) => {
                log::info!("CONFIG: Loaded {}", path.display());
                settings
            }
            Err(ConfigError::Io { .. }) => {
                log::info!("CONFIG: {} not found, using defaults", path.display());
                let settings = Self::default();
                if let Err(e) = settings.save(path) {
                    log::warn!("CONFIG: Could not write default settings: {}", e);
                }
                settings
            }
            Err(e) => {
                log::warn!("CONFIG: {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_toml(path, self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub songs_dir: PathBuf,
    /// Audio played when no beatmap is selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_audio: Option<PathBuf>,
    pub master_volume: f32,
    /// Use the playing beatmap's background instead of the menu background.
    pub dynamic_background: bool,
    /// Ignore mouse buttons during gameplay.
    pub mouse_disabled: bool,
    /// Index into [`TARGET_FPS`].
    pub fps_index: usize,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            songs_dir: PathBuf::from("songs"),
            theme_audio: None,
            master_volume: 0.5,
            dynamic_background: true,
            mouse_disabled: false,
            fps_index: 0,
        }
    }
}

impl GeneralSettings {
    pub fn target_fps(&self) -> u32 {
        TARGET_FPS[self.fps_index % TARGET_FPS.len()]
    }

    /// Switches to the next frame rate target and returns it.
    pub fn cycle_target_fps(&mut self) -> u32 {
        self.fps_index = (self.fps_index + 1) % TARGET_FPS.len();
        self.target_fps()
    }

    /// Moves the master volume one step up (`direction > 0`) or down.
    pub fn step_volume(&mut self, direction: i32) -> f32 {
        let step = if direction < 0 { -VOLUME_STEP } else { VOLUME_STEP };
        self.master_volume = (self.master_volume + step).clamp(0.0, 1.0);
        self.master_volume
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorSettings {
    pub enabled: bool,
    /// Interpolated trail with a separate middle glyph.
    pub new_style: bool,
    /// Grow the glyph while a button is held.
    pub expanded: bool,
    pub rotate_glyph: bool,
    pub rotate_trail: bool,
    pub scale: f32,
    /// Trail length to keep; replaces the style's removal count when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_trail_length: Option<usize>,
    pub color: Color,
    pub mirror_color: Color,
    /// Tint only the trail, keep the glyph white.
    pub only_color_trail: bool,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            new_style: true,
            expanded: true,
            rotate_glyph: true,
            rotate_trail: false,
            scale: 1.0,
            max_trail_length: None,
            color: colors::WHITE,
            mirror_color: colors::WHITE,
            only_color_trail: false,
        }
    }
}

/// Unscaled size of a skin image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SizeConf {
    pub width: f32,
    pub height: f32,
}

impl SizeConf {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Image sizes the menu lays its buttons out with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub logo: SizeConf,
    pub play: SizeConf,
    pub exit: SizeConf,
    pub music_icon: SizeConf,
    pub downloads: SizeConf,
    pub repository: SizeConf,
    pub update: SizeConf,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            logo: SizeConf::new(512.0, 512.0),
            play: SizeConf::new(400.0, 110.0),
            exit: SizeConf::new(370.0, 110.0),
            music_icon: SizeConf::new(30.0, 30.0),
            downloads: SizeConf::new(96.0, 240.0),
            repository: SizeConf::new(48.0, 48.0),
            update: SizeConf::new(64.0, 64.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    pub repository: String,
    pub dance_repository: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            repository: "https://github.com/itdelatrisu/opsu".to_string(),
            dance_repository: "https://github.com/yugecin/opsu-dance".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [cursor]
            new_style = false
            max_trail_length = 40
            "#,
        )
        .unwrap();
        assert!(!settings.cursor.new_style);
        assert_eq!(settings.cursor.max_trail_length, Some(40));
        assert!(settings.cursor.enabled);
        assert_eq!(settings.layout.music_icon, SizeConf::new(30.0, 30.0));
        assert_eq!(settings.general.songs_dir, PathBuf::from("songs"));
    }

    #[test]
    fn defaults_survive_a_save_load_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let mut settings = Settings::default();
        settings.general.master_volume = 0.8;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.general.master_volume, 0.8);
        assert_eq!(loaded.links.repository, settings.links.repository);
    }

    #[test]
    fn fps_cycles_through_targets() {
        let mut general = GeneralSettings::default();
        assert_eq!(general.target_fps(), 60);
        assert_eq!(general.cycle_target_fps(), 120);
        assert_eq!(general.cycle_target_fps(), 240);
        assert_eq!(general.cycle_target_fps(), 480);
        assert_eq!(general.cycle_target_fps(), 60);
    }

    #[test]
    fn volume_steps_are_clamped() {
        let mut general = GeneralSettings {
            master_volume: 0.98,
            ..GeneralSettings::default()
        };
        assert_eq!(general.step_volume(1), 1.0);
        general.master_volume = 0.02;
        assert_eq!(general.step_volume(-1), 0.0);
    }
}
