//! Team strength: mean roster rating scaled by the home/away modifier.

use crate::error::{CoreError, Result};
use crate::models::{Player, Snapshot};

pub const HOME_ADVANTAGE: f64 = 1.1;
pub const AWAY_MODIFIER: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct StrengthCalculator {
    home_advantage: f64,
}

impl Default for StrengthCalculator {
    fn default() -> Self {
        Self::new(HOME_ADVANTAGE)
    }
}

impl StrengthCalculator {
    pub fn new(home_advantage: f64) -> Self {
        Self { home_advantage }
    }

    pub fn modifier(&self, is_home: bool) -> f64 {
        if is_home {
            self.home_advantage
        } else {
            AWAY_MODIFIER
        }
    }

    /// Mean rating of `roster` times the side modifier.
    ///
    /// Fails with [`CoreError::EmptyRoster`] when `roster` yields nothing.
    pub fn calculate<'a, I>(&self, team_name: &str, roster: I, is_home: bool) -> Result<f64>
    where
        I: IntoIterator<Item = &'a Player>,
    {
        let (count, total) =
            roster.into_iter().fold((0u32, 0u32), |(n, sum), p| (n + 1, sum + p.rating as u32));
        if count == 0 {
            return Err(CoreError::EmptyRoster(team_name.to_string()));
        }

        let mean = total as f64 / count as f64;
        Ok(mean * self.modifier(is_home))
    }

    pub fn for_team(&self, snapshot: &Snapshot, team_name: &str, is_home: bool) -> Result<f64> {
        let team = snapshot.find_team(team_name)?;
        self.calculate(&team.name, snapshot.roster(&team.name), is_home)
    }
}

/// Strength with the standard 1.1 home advantage.
pub fn strength(snapshot: &Snapshot, team_name: &str, is_home: bool) -> Result<f64> {
    StrengthCalculator::default().for_team(snapshot, team_name, is_home)
}
