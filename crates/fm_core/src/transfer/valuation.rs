//! Market value calculation.
//!
//! `value = rating * 2M * age_factor + goals * 500K + assists * 300K + (minutes / 90) * 100K`

use crate::error::{CoreError, Result};
use crate::models::{Money, Player};

pub const VALUE_PER_RATING_POINT: f64 = 2_000_000.0;
pub const VALUE_PER_GOAL: f64 = 500_000.0;
pub const VALUE_PER_ASSIST: f64 = 300_000.0;
pub const VALUE_PER_FULL_MATCH: f64 = 100_000.0;

pub const PEAK_AGE: u8 = 26;
/// Age factor lost per year away from the peak, either direction.
pub const AGE_DECAY_PER_YEAR: f64 = 0.05;

/// 1.0 at 26, minus 0.05 per year in either direction, never below 0.
pub fn age_factor(age: u8) -> f64 {
    let distance = (age as i32 - PEAK_AGE as i32).unsigned_abs();
    (1.0 - AGE_DECAY_PER_YEAR * distance as f64).max(0.0)
}

/// Pure and deterministic; fails only for `age == 0`.
pub fn calculate_value(player: &Player) -> Result<Money> {
    if player.age == 0 {
        return Err(CoreError::InvalidAge { player: player.name.clone(), age: player.age });
    }

    let stats = &player.stats;
    let base = player.rating as f64 * VALUE_PER_RATING_POINT * age_factor(player.age);
    let performance = stats.goals as f64 * VALUE_PER_GOAL
        + stats.assists as f64 * VALUE_PER_ASSIST
        + stats.minutes_played as f64 / 90.0 * VALUE_PER_FULL_MATCH;

    Ok(Money((base + performance).trunc() as u64))
}
