//! Session configuration: tuning knobs, preset tables, waves and the path.
//!
//! Every field has a default matching `bulwark_core::constants`, so a JSON
//! file only needs to list what it overrides.

use std::path::{Path as FsPath, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bulwark_core::constants::*;
use bulwark_core::stats::{EnemyRoster, TowerRoster};
use bulwark_core::types::GameArea;
use bulwark_core::waves::{default_waves, WaveDefinition};

use crate::path::default_waypoints;

/// Errors raised while loading or validating a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("path needs at least 2 waypoints, got {0}")]
    PathTooShort(usize),
    #[error("sell refund ratio must be within [0, 1], got {0}")]
    InvalidRefundRatio(f32),
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: String, value: f64 },
}

/// Everything needed to start a play session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub starting_lives: u32,
    pub starting_currency: u32,
    pub wave_clear_bonus: u32,
    /// Delay between a wave announcement and its first spawn entry (ms).
    pub announce_delay_ms: f64,
    /// Pause after a cleared wave before the next one is announced (ms).
    pub wave_break_ms: f64,
    pub sell_refund_ratio: f32,
    pub notice_lifetime_ms: f64,
    pub game_area: GameArea,
    pub enemies: EnemyRoster,
    pub towers: TowerRoster,
    pub waves: Vec<WaveDefinition>,
    pub path: Vec<Vec2>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let game_area = GameArea::default();
        Self {
            starting_lives: STARTING_LIVES,
            starting_currency: STARTING_CURRENCY,
            wave_clear_bonus: WAVE_CLEAR_BONUS,
            announce_delay_ms: WAVE_ANNOUNCE_DELAY_MS,
            wave_break_ms: WAVE_BREAK_DELAY_MS,
            sell_refund_ratio: SELL_REFUND_RATIO,
            notice_lifetime_ms: NOTICE_LIFETIME_MS,
            path: default_waypoints(&game_area),
            game_area,
            enemies: EnemyRoster::default(),
            towers: TowerRoster::default(),
            waves: default_waves(),
        }
    }
}

impl SessionConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Reject configurations the simulation cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.len() < 2 {
            return Err(ConfigError::PathTooShort(self.path.len()));
        }
        if !(0.0..=1.0).contains(&self.sell_refund_ratio) {
            return Err(ConfigError::InvalidRefundRatio(self.sell_refund_ratio));
        }
        for kind in bulwark_core::enums::EnemyKind::ALL {
            let stats = self.enemies.get(kind);
            positive(&format!("{kind:?} traverse_ms"), stats.traverse_ms)?;
        }
        for kind in bulwark_core::enums::TowerKind::ALL {
            let stats = self.towers.get(kind);
            positive(&format!("{kind:?} fire_interval_ms"), stats.fire_interval_ms)?;
            positive(
                &format!("{kind:?} projectile_speed"),
                stats.projectile_speed as f64,
            )?;
        }
        Ok(())
    }
}

fn positive(what: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            what: what.to_string(),
            value,
        })
    }
}
