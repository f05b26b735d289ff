//! Game settings and tuning
//!
//! Loaded once at startup from an embedded JSON block (web) or a file named by
//! `GAP_GLIDER_SETTINGS` (native). Nothing is ever written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::Surface;

/// Physics and obstacle constants for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    /// Velocity assigned on jump (negative is up)
    pub jump_impulse: f32,
    pub pipe_width: f32,
    pub gap_size: f32,
    pub pipe_speed: f32,
    pub min_margin: f32,
    pub spawn_interval_ms: f64,
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            pipe_width: PIPE_WIDTH,
            gap_size: GAP_SIZE,
            pipe_speed: PIPE_SPEED,
            min_margin: MIN_MARGIN,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
        }
    }
}

impl Tuning {
    /// Reject values that cannot produce a playable field
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("pipe_width", self.pipe_width),
            ("gap_size", self.gap_size),
            ("pipe_speed", self.pipe_speed),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Tuning(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms > 0.0) {
            return Err(Error::Tuning(format!(
                "spawn_interval_ms must be positive, got {}",
                self.spawn_interval_ms
            )));
        }
        if !(self.min_margin.is_finite() && self.min_margin >= 0.0) {
            return Err(Error::Tuning(format!(
                "min_margin must not be negative, got {}",
                self.min_margin
            )));
        }
        if self.player_height >= self.gap_size {
            return Err(Error::Tuning(format!(
                "player_height {} does not fit through gap_size {}",
                self.player_height, self.gap_size
            )));
        }
        if !(self.gravity.is_finite() && self.jump_impulse.is_finite()) {
            return Err(Error::Tuning("gravity and jump_impulse must be finite".into()));
        }
        Ok(())
    }

    /// `validate`, plus both barriers keeping `min_margin` on this surface
    pub fn validate_for(&self, surface: Surface) -> Result<()> {
        self.validate()?;
        let needed = self.gap_size + 2.0 * self.min_margin;
        if needed > surface.height {
            return Err(Error::Tuning(format!(
                "gap_size {} with min_margin {} needs height {}, surface is {}",
                self.gap_size, self.min_margin, needed, surface.height
            )));
        }
        Ok(())
    }
}

/// Startup settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    pub tuning: Tuning,
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Keep the tuning only if it fits `surface`, otherwise use defaults
    pub fn fit_to(self, surface: Surface) -> Self {
        match self.tuning.validate_for(surface) {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Ignoring tuning: {}", e);
                Self {
                    tuning: Tuning::default(),
                    ..self
                }
            }
        }
    }

    /// Element holding the settings JSON on the page
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "settings";

    /// Environment variable naming a settings file
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_VAR: &'static str = "GAP_GLIDER_SETTINGS";

    /// Load settings from the page's `<script id="settings">` block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => Self::from_json_or_default(&json),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the file named by `GAP_GLIDER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path, Error::from(e));
                Self::default()
            }
        }
    }

    fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings: {}", e);
                Self::default()
            }
        }
    }
}
