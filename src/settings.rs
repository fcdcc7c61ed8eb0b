//! Game settings and tuning
//!
//! Persisted in LocalStorage as JSON. Missing fields fall back to defaults so
//! older saves keep loading.

use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::camera::CameraConfig;
use crate::sim::PhysicsConfig;

/// Pointer and wheel sensitivities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Radians of yaw per pixel of horizontal drag
    pub drag_sensitivity: f32,
    /// Zoom distance per wheel delta unit
    pub zoom_sensitivity: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.01,
            zoom_sensitivity: 0.01,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,

    // === HUD ===
    /// Draw the minimap overlay
    pub show_minimap: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            show_minimap: true,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.physics.validate()?;
        if !(self.camera.min_distance > 0.0 && self.camera.min_distance <= self.camera.max_distance)
        {
            return Err(GameError::InvalidSetting {
                field: "camera.min_distance",
                reason: "must be positive and not above max_distance",
            });
        }
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "vibes_fc_settings";

    /// Load settings from LocalStorage (WASM only).
    ///
    /// The first run writes the defaults back so the key exists for hand
    /// editing in dev tools.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match storage.get_item(Self::STORAGE_KEY) {
                Ok(Some(json)) => match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                },
                Ok(None) => {
                    let settings = Self::default();
                    settings.save();
                    return settings;
                }
                Err(_) => log::warn!("LocalStorage not readable"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        else {
            log::warn!("Settings not saved: no LocalStorage");
            return;
        };

        match self.to_json() {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(_) => log::warn!("Settings not saved: LocalStorage write failed"),
            },
            Err(e) => log::warn!("Settings not saved: {e}"),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::KickPolicy;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            Settings::from_json(r#"{"physics": {"kick_policy": "Additive"}, "show_minimap": false}"#)
                .expect("valid settings");
        assert_eq!(settings.physics.kick_policy, KickPolicy::Additive);
        assert_eq!(settings.physics.ball_radius, crate::consts::BALL_RADIUS);
        assert!(!settings.show_minimap);
        assert_eq!(settings.camera, CameraConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::default();
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let err = Settings::from_json(r#"{"physics": {"bounce": 1.5}}"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidSetting { field: "bounce", .. }));

        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, GameError::SettingsParse(_)));

        let err = Settings::from_json(r#"{"camera": {"min_distance": 30.0}}"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidSetting { .. }));
    }

    #[test]
    fn test_time_scaled_friction_parses() {
        let settings = Settings::from_json(
            r#"{"physics": {"friction_model": {"TimeScaled": {"reference_dt": 0.016666668}}}}"#,
        )
        .unwrap();
        assert!(matches!(
            settings.physics.friction_model,
            crate::sim::FrictionModel::TimeScaled { .. }
        ));
    }
}
