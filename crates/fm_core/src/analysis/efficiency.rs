//! Per-player efficiency metrics.

use crate::models::Player;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerEfficiency {
    pub player: String,
    pub team: String,
    pub goals_per_90: f64,
    pub assists_per_90: f64,
    pub goal_contributions: u32,
    /// goals / shots on target, 0.0 ..= 1.0 in sane data
    pub shot_conversion: f64,
}

impl PlayerEfficiency {
    pub fn of(player: &Player) -> Self {
        let stats = &player.stats;
        Self {
            player: player.name.clone(),
            team: player.team.clone(),
            goals_per_90: per_90(stats.goals, stats.minutes_played),
            assists_per_90: per_90(stats.assists, stats.minutes_played),
            goal_contributions: stats.goal_contributions(),
            shot_conversion: ratio(stats.goals, stats.shots_on_target),
        }
    }

    pub fn shot_conversion_percent(&self) -> f64 {
        self.shot_conversion * 100.0
    }
}

/// `count / (minutes / 90)`, 0 when no minutes were played.
pub fn per_90(count: u32, minutes_played: u32) -> f64 {
    if minutes_played == 0 {
        return 0.0;
    }
    count as f64 * 90.0 / minutes_played as f64
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
