//! Game settings and preferences
//!
//! Read-only configuration: world choice, quality, key bindings and touch
//! sensitivity. On the web it comes from LocalStorage; nothing is written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::input::{JOYSTICK_THRESHOLD, KeyBindings};
use crate::sim::WorldKind;

/// Why a settings document was rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Fireflies drifting over the play area
    pub fn firefly_count(&self) -> usize {
        match self {
            QualityPreset::Low => 30,
            QualityPreset::Medium => 60,
            QualityPreset::High => 120,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which world to load
    pub world: WorldKind,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Keyboard layout
    pub bindings: KeyBindings,
    /// Joystick deflection (0..1) before a direction registers
    pub touch_threshold: f32,
    /// Reduced motion (no fireflies)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldKind::Forest,
            quality: QualityPreset::Medium,
            bindings: KeyBindings::default(),
            touch_threshold: JOYSTICK_THRESHOLD,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "orb_forage_settings";

    /// Override the quality preset by name ("low", "medium", "high")
    pub fn set_quality(&mut self, name: &str) -> Result<(), SettingsError> {
        self.quality = QualityPreset::parse(name).ok_or_else(|| SettingsError::InvalidValue {
            field: "quality",
            reason: format!("unknown preset {name:?}"),
        })?;
        Ok(())
    }

    /// Effective firefly count (respects reduced_motion)
    pub fn firefly_count(&self) -> usize {
        if self.reduced_motion {
            0
        } else {
            self.quality.firefly_count()
        }
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.touch_threshold.is_finite() && (0.0..1.0).contains(&self.touch_threshold)) {
            return Err(SettingsError::InvalidValue {
                field: "touch_threshold",
                reason: format!("{} is outside [0, 1)", self.touch_threshold),
            });
        }
        let b = &self.bindings;
        for (field, codes) in [
            ("bindings.forward", &b.forward),
            ("bindings.backward", &b.backward),
            ("bindings.left", &b.left),
            ("bindings.right", &b.right),
        ] {
            if codes.is_empty() {
                return Err(SettingsError::InvalidValue {
                    field,
                    reason: "no keys bound".to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native: settings come from `ORB_FORAGE_SETTINGS` (a JSON document) if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(json) = std::env::var(Self::STORAGE_KEY.to_uppercase()) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring {}: {e}", Self::STORAGE_KEY.to_uppercase());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_document() {
        let settings =
            Settings::from_json(r#"{"world":"space","quality":"High"}"#).unwrap();
        assert_eq!(settings.world, WorldKind::Space);
        assert_eq!(settings.firefly_count(), 120);
        assert_eq!(settings.bindings, KeyBindings::default());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ world: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let err = Settings::from_json(r#"{"touch_threshold":1.5}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidValue {
                field: "touch_threshold",
                ..
            }
        ));
    }

    #[test]
    fn test_unbound_direction_rejected() {
        let err = Settings::from_json(r#"{"bindings":{"left":[]}}"#).unwrap_err();
        assert!(err.to_string().contains("bindings.left"));
    }

    #[test]
    fn test_reduced_motion_hides_fireflies() {
        let mut settings = Settings {
            quality: QualityPreset::Low,
            ..Settings::default()
        };
        assert_eq!(settings.firefly_count(), 30);
        settings.reduced_motion = true;
        assert_eq!(settings.firefly_count(), 0);
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_quality_override() {
        let mut settings = Settings::default();
        settings.set_quality("High").unwrap();
        assert_eq!(settings.firefly_count(), 120);

        let err = settings.set_quality("ultra").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { field: "quality", .. }));
        assert_eq!(settings.quality, QualityPreset::High);
    }
}
