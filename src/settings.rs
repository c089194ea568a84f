//! Rule and grid settings
//!
//! Loaded from JSON by the host; every field falls back to the `consts` defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::BubbleColor;

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Rule, grid and physics settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Same-color group size needed to pop (includes the snapped bubble)
    pub min_group_size: usize,

    // === Grid ===
    /// Number of sections (rows)
    pub grid_sections: u16,
    /// Cells in an even section
    pub grid_columns: u16,

    // === Projectiles ===
    /// Number of colors the feed draws from
    pub palette_size: u8,
    /// Projectile speed per physics step
    pub bubble_speed: f32,

    // === Physics ===
    /// Fraction of a bubble's radius used for its collision circle
    pub hit_box_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_group_size: MIN_GROUP_SIZE,

            grid_sections: GRID_SECTIONS,
            grid_columns: GRID_COLUMNS,

            palette_size: PALETTE_SIZE,
            bubble_speed: BUBBLE_SPEED,

            hit_box_scale: HIT_BOX_SCALE,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse settings, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring bad settings ({e}), using defaults");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Check ranges the rest of the crate relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_group_size == 0 {
            return Err(SettingsError::Invalid("min_group_size must be at least 1".into()));
        }
        if self.grid_sections == 0 || self.grid_columns < 2 {
            return Err(SettingsError::Invalid(format!(
                "grid must have at least 1 section and 2 columns, got {}x{}",
                self.grid_sections, self.grid_columns
            )));
        }
        if self.palette_size == 0 || self.palette_size as usize > BubbleColor::ALL.len() {
            return Err(SettingsError::Invalid(format!(
                "palette_size must be 1..={}, got {}",
                BubbleColor::ALL.len(),
                self.palette_size
            )));
        }
        if !(self.bubble_speed >= 0.0) {
            return Err(SettingsError::Invalid(format!(
                "bubble_speed must be non-negative, got {}",
                self.bubble_speed
            )));
        }
        if !(self.hit_box_scale > 0.0 && self.hit_box_scale <= 1.0) {
            return Err(SettingsError::Invalid(format!(
                "hit_box_scale must be in (0, 1], got {}",
                self.hit_box_scale
            )));
        }
        Ok(())
    }
}
