//! Game settings and preferences
//!
//! Persisted as JSON, separately from the highscore table: a dotfile on
//! native, LocalStorage in the browser.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Show the FPS overlay (toggled in-game with `f`)
    pub show_fps: bool,

    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: false,
            master_volume: 0.8,
            music_volume: 0.5,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Effective effect volume after master and mute
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music volume after master and mute
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// LocalStorage key (browser builds)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "starleap_settings";
    /// Settings file (native builds)
    #[allow(dead_code)]
    const FILE_NAME: &'static str = ".starleap_settings.json";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok())
            .flatten();

        match stored.and_then(|json| serde_json::from_str(&json).ok()) {
            Some(settings) => settings,
            None => {
                log::info!("no stored settings, using defaults");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
        else {
            return;
        };
        if let Ok(json) = serde_json::to_string(self) {
            if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                log::warn!("failed to save settings to LocalStorage");
            }
        }
    }

    /// Load settings from the dotfile (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("malformed settings file ({err}); using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the dotfile (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(Self::FILE_NAME, json) {
                    log::warn!("failed to save settings: {err}");
                }
            }
            Err(err) => log::warn!("failed to encode settings: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_zeroes_effective_volumes() {
        let mut settings = Settings::default();
        assert!(settings.effective_sfx_volume() > 0.0);

        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            show_fps: true,
            master_volume: 0.4,
            music_volume: 0.2,
            sfx_volume: 0.9,
            muted: false,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.show_fps, settings.show_fps);
        assert_eq!(back.master_volume, settings.master_volume);
    }
}
