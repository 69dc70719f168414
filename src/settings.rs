//! Draw settings and preferences
//!
//! Persisted separately from the draw itself in LocalStorage. Missing
//! fields take their defaults so older saved settings keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::{ITEM_HEIGHT_FALLBACK, SETTINGS_KEY};
use crate::error::DrawError;
use crate::persistence::KeyValueStore;

/// Timing and presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawSettings {
    // === Draw rollers ===
    /// Total spin length before lanes settle
    pub spin_duration_ms: u32,
    /// Shuffle tick period while spinning
    pub shuffle_tick_ms: u32,
    /// Tile height used when the DOM reports 0
    pub item_height_fallback: f32,

    // === Single roller ===
    pub single_spin_duration_ms: u32,
    pub single_shuffle_tick_ms: u32,
    /// How long confetti stays up after a correct guess
    pub confetti_ms: u32,

    // === Audio ===
    /// Play the spin sound
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            spin_duration_ms: 10_000,
            shuffle_tick_ms: 80,
            item_height_fallback: ITEM_HEIGHT_FALLBACK,

            single_spin_duration_ms: 4_000,
            single_shuffle_tick_ms: 70,
            confetti_ms: 1_200,

            sound: true,
            volume: 0.6,
        }
    }
}

impl DrawSettings {
    /// Reject timings the timers can't run with
    pub fn validate(&self) -> Result<(), DrawError> {
        for (name, tick, duration) in [
            ("draw", self.shuffle_tick_ms, self.spin_duration_ms),
            ("single", self.single_shuffle_tick_ms, self.single_spin_duration_ms),
        ] {
            if tick == 0 {
                return Err(DrawError::InvalidSettings(format!(
                    "{name} shuffle tick must be positive"
                )));
            }
            if duration < tick {
                return Err(DrawError::InvalidSettings(format!(
                    "{name} spin ({duration}ms) is shorter than one tick ({tick}ms)"
                )));
            }
        }
        if self.item_height_fallback.is_nan() || self.item_height_fallback <= 0.0 {
            return Err(DrawError::InvalidSettings(
                "item height fallback must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Load settings from storage, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Ok(Some(json)) = store.get_item(SETTINGS_KEY) {
            match serde_json::from_str::<Self>(&json) {
                Ok(settings) => match settings.validate() {
                    Ok(()) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring saved settings: {}", e),
                },
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), DrawError> {
        self.validate()?;
        let json = serde_json::to_string(self).map_err(|e| DrawError::Storage(e.to_string()))?;
        store.set_item(SETTINGS_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
