//! # Engine Configuration
//!
//! 모든 튜닝 상수를 한 곳에서 관리한다.
//!
//! ```rust
//! use fm_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.base_goal_rate > config.base_goal_rate);
//! ```

use crate::error::CoreError;
use crate::save::StoreError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MAX_BASE_GOAL_RATE: f64 = 20.0;
pub const MAX_GOAL_SIGMA: f64 = 10.0;
pub const MAX_LATE_SURGE_SLOPE: f64 = 100.0;

/// Match simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Match length in minutes (기본: 90)
    pub match_duration: u16,
    /// Home strength multiplier (기본: 1.1)
    pub home_advantage: f64,
    /// Expected goals of both sides combined over 90 minutes (기본: 2.7)
    pub base_goal_rate: f64,
    /// Standard deviation of the per-side goal count (기본: 1.0)
    pub goal_sigma: f64,
    /// Chance that a goal carries an assist (기본: 0.6)
    pub assist_probability: f64,
    /// How goal minutes are distributed over the match
    pub minute_policy: MinutePolicy,
    pub points_for_win: u32,
    pub points_for_draw: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_duration: 90,
            home_advantage: 1.1,
            base_goal_rate: 2.7,
            goal_sigma: 1.0,
            assist_probability: 0.6,
            minute_policy: MinutePolicy::Uniform,
            points_for_win: 3,
            points_for_draw: 1,
        }
    }
}

/// Goal minute distribution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MinutePolicy {
    /// Every minute in `1..=duration` equally likely.
    #[default]
    Uniform,
    /// Weight grows linearly from 1.0 at minute 1 to `1.0 + slope` at the
    /// final minute, modelling tiring defences.
    LateSurge { slope: f64 },
}

impl EngineConfig {
    /// 현실적인 시뮬레이션 (기본)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// More goals, more of them late.
    pub fn arcade() -> Self {
        Self {
            base_goal_rate: 4.2,
            goal_sigma: 1.4,
            assist_probability: 0.75,
            minute_policy: MinutePolicy::LateSurge { slope: 1.0 },
            ..Self::default()
        }
    }

    /// Tight, low-scoring matches.
    pub fn defensive() -> Self {
        Self { base_goal_rate: 1.9, goal_sigma: 0.8, assist_probability: 0.5, ..Self::default() }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "realistic" => Some(Self::realistic()),
            "arcade" => Some(Self::arcade()),
            "defensive" => Some(Self::defensive()),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.match_duration == 0 {
            return Err(CoreError::InvalidDuration(self.match_duration));
        }
        if !(self.home_advantage.is_finite() && self.home_advantage > 0.0) {
            return Err(invalid("home_advantage must be positive"));
        }
        if !(0.0..=MAX_BASE_GOAL_RATE).contains(&self.base_goal_rate) {
            return Err(invalid("base_goal_rate must be within 0.0..=20.0"));
        }
        if !(0.0..=MAX_GOAL_SIGMA).contains(&self.goal_sigma) {
            return Err(invalid("goal_sigma must be within 0.0..=10.0"));
        }
        if !(0.0..=1.0).contains(&self.assist_probability) {
            return Err(invalid("assist_probability must be within 0.0..=1.0"));
        }
        if let MinutePolicy::LateSurge { slope } = self.minute_policy {
            if !(0.0..=MAX_LATE_SURGE_SLOPE).contains(&slope) {
                return Err(invalid("late surge slope must be within 0.0..=100.0"));
            }
        }
        if self.points_for_draw > self.points_for_win {
            return Err(invalid("a draw cannot be worth more than a win"));
        }
        Ok(())
    }

    /// Reads a config file. `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
    /// Missing fields fall back to the defaults.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::FileNotFound { path: path.display().to_string() });
        }
        let text = std::fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let config: EngineConfig =
            if is_yaml { serde_yaml::from_str(&text)? } else { serde_json::from_str(&text)? };

        config.validate().map_err(|e| StoreError::Malformed(e.to_string()))?;
        log::debug!("Loaded engine config from {:?}", path);
        Ok(config)
    }
}

fn invalid(msg: &str) -> CoreError {
    CoreError::Validation(msg.to_string())
}

// ========== Tests ==========
