//! Persistent player settings: music and sound volume.
//!
//! Stored as a flat TOML key-value file:
//!
//! ```toml
//! MusicVolume = 1.0
//! SoundVolume = 0.8
//! ```
//!
//! Loaded once at startup (defaults to 1.0 for missing keys or files) and
//! written back whenever either value changes.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default settings file, relative to the working directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Volume change per press of a −/+ control.
pub const VOLUME_STEP: f32 = 0.1;

/// Errors from reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("settings could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Which volume a control adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum VolumeChannel {
    Music,
    Sound,
}

impl VolumeChannel {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Music => "Music",
            Self::Sound => "Sound",
        }
    }
}

/// Linear volumes in `[0, 1]`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
pub struct VolumeSettings {
    #[serde(rename = "MusicVolume", default = "full_volume")]
    pub music: f32,
    #[serde(rename = "SoundVolume", default = "full_volume")]
    pub sound: f32,
}

const fn full_volume() -> f32 {
    1.0
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            music: full_volume(),
            sound: full_volume(),
        }
    }
}

impl VolumeSettings {
    #[must_use]
    pub const fn get(&self, channel: VolumeChannel) -> f32 {
        match channel {
            VolumeChannel::Music => self.music,
            VolumeChannel::Sound => self.sound,
        }
    }

    /// Sets a channel, clamped to `[0, 1]` and snapped to hundredths.
    pub fn set(&mut self, channel: VolumeChannel, value: f32) {
        let value = (value.clamp(0.0, 1.0) * 100.0).round() / 100.0;
        match channel {
            VolumeChannel::Music => self.music = value,
            VolumeChannel::Sound => self.sound = value,
        }
    }

    pub fn adjust(&mut self, channel: VolumeChannel, delta: f32) {
        self.set(channel, self.get(channel) + delta);
    }

    /// Out-of-range values from a hand-edited file are clamped.
    #[must_use]
    fn sanitized(mut self) -> Self {
        let (music, sound) = (self.music, self.sound);
        self.set(VolumeChannel::Music, if music.is_finite() { music } else { 1.0 });
        self.set(VolumeChannel::Sound, if sound.is_finite() { sound } else { 1.0 });
        self
    }

    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        let settings: Self = toml::from_str(&content)?;
        Ok(settings.sanitized())
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let content = toml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Location of the settings file.
#[derive(Resource, Debug, Clone)]
pub struct SettingsPath(pub PathBuf);

impl Default for SettingsPath {
    fn default() -> Self {
        Self(PathBuf::from(SETTINGS_FILE))
    }
}

fn load_volume_settings(mut commands: Commands, path: Res<SettingsPath>) {
    let settings = VolumeSettings::load(&path.0).unwrap_or_else(|err| {
        warn!("Using default volume settings: {err}");
        VolumeSettings::default()
    });
    commands.insert_resource(settings);
}

/// Writes settings back on every change (the initial insert is not a change).
fn persist_volume_settings(settings: Res<VolumeSettings>, path: Res<SettingsPath>) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    if let Err(err) = settings.save(&path.0) {
        error!("Failed to save volume settings to {}: {err}", path.0.display());
    }
}

pub fn plugin(app: &mut App) {
    app.register_type::<VolumeSettings>()
        .init_resource::<SettingsPath>()
        .init_resource::<VolumeSettings>();

    app.add_systems(PreStartup, load_volume_settings);
    app.add_systems(
        PostUpdate,
        persist_volume_settings.run_if(resource_exists::<VolumeSettings>),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_settings_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("cube-volley-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}-{}.toml", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn defaults_are_full_volume() {
        let settings = VolumeSettings::default();
        assert_eq!(settings.music, 1.0);
        assert_eq!(settings.sound, 1.0);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = temp_settings_path("missing");
        assert_eq!(VolumeSettings::load(&path).unwrap(), VolumeSettings::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = temp_settings_path("save-load");
        let settings = VolumeSettings {
            music: 0.3,
            sound: 0.7,
        };
        settings.save(&path).unwrap();
        assert_eq!(VolumeSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn file_uses_flat_keys() {
        let path = temp_settings_path("keys");
        VolumeSettings {
            music: 0.5,
            sound: 0.25,
        }
        .save(&path)
        .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("MusicVolume = 0.5"), "got {content}");
        assert!(content.contains("SoundVolume = 0.25"), "got {content}");
    }

    #[test]
    fn missing_key_defaults_to_full_volume() {
        let path = temp_settings_path("partial");
        std::fs::write(&path, "SoundVolume = 0.4\n").unwrap();
        let settings = VolumeSettings::load(&path).unwrap();
        assert_eq!(settings.music, 1.0);
        assert_eq!(settings.sound, 0.4);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let path = temp_settings_path("clamp");
        std::fs::write(&path, "MusicVolume = 3.0\nSoundVolume = -1.0\n").unwrap();
        let settings = VolumeSettings::load(&path).unwrap();
        assert_eq!(settings.music, 1.0);
        assert_eq!(settings.sound, 0.0);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = temp_settings_path("malformed");
        std::fs::write(&path, "MusicVolume = = loud").unwrap();
        assert!(matches!(
            VolumeSettings::load(&path),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn adjust_clamps_at_bounds() {
        let mut settings = VolumeSettings::default();
        settings.adjust(VolumeChannel::Music, VOLUME_STEP);
        assert_eq!(settings.music, 1.0);

        settings.set(VolumeChannel::Sound, 0.05);
        settings.adjust(VolumeChannel::Sound, -VOLUME_STEP);
        assert_eq!(settings.sound, 0.0);
    }

    #[test]
    fn repeated_steps_do_not_drift() {
        let mut settings = VolumeSettings::default();
        for _ in 0..3 {
            settings.adjust(VolumeChannel::Music, -VOLUME_STEP);
        }
        assert_eq!(settings.music, 0.7);
    }

    #[test]
    fn change_is_written_to_disk() {
        let path = temp_settings_path("persist");
        let mut app = crate::testing::create_test_app();
        app.insert_resource(SettingsPath(path.clone()));
        app.add_plugins(plugin);
        app.update();
        assert!(!path.exists(), "loading alone must not write the file");

        app.world_mut()
            .resource_mut::<VolumeSettings>()
            .set(VolumeChannel::Music, 0.4);
        app.update();

        assert_eq!(VolumeSettings::load(&path).unwrap().music, 0.4);
    }
}
