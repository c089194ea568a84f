//! Bubble Blast - rules and physics core of a grid bubble shooter
//!
//! Core modules:
//! - `sim`: Chain-reaction resolver, grid model, collision detection
//! - `settings`: Data-driven rule and grid configuration

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Minimum same-color group size (including the snapped bubble) that pops
    pub const MIN_GROUP_SIZE: usize = 3;

    /// Grid dimensions
    pub const GRID_SECTIONS: u16 = 12;
    /// Cells in an even section; odd sections hold one less
    pub const GRID_COLUMNS: u16 = 12;

    /// Number of colors the projectile feed draws from
    pub const PALETTE_SIZE: u8 = 4;

    /// Projectile speed (units per physics step)
    pub const BUBBLE_SPEED: f32 = 15.0;
    /// Fraction of a bubble's radius used for its collision circle
    pub const HIT_BOX_SCALE: f32 = 0.65;
}
