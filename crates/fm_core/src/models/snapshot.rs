//! In-memory season snapshot: both collections plus the append-only histories.

use super::{MatchResult, Player, Position, Team, Transfer};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_history: Vec<MatchResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfer_history: Vec<Transfer>,
}

impl Snapshot {
    pub fn new(teams: Vec<Team>, players: Vec<Player>) -> Self {
        Self { teams, players, match_history: Vec::new(), transfer_history: Vec::new() }
    }

    /// Case-insensitive team lookup.
    pub fn find_team(&self, name: &str) -> Result<&Team> {
        self.team_index(name).map(|idx| &self.teams[idx])
    }

    pub fn team_index(&self, name: &str) -> Result<usize> {
        self.teams
            .iter()
            .position(|t| t.has_name(name))
            .ok_or_else(|| CoreError::TeamNotFound(name.to_string()))
    }

    /// Case-insensitive player lookup across every roster.
    ///
    /// Names are only unique within a team, so a name shared by players of
    /// different teams is reported as ambiguous instead of picking one.
    pub fn find_player(&self, name: &str) -> Result<&Player> {
        self.player_index(name).map(|idx| &self.players[idx])
    }

    pub fn player_index(&self, name: &str) -> Result<usize> {
        let mut matches = self.players.iter().enumerate().filter(|(_, p)| p.has_name(name));
        let (idx, _) = matches.next().ok_or_else(|| CoreError::PlayerNotFound(name.to_string()))?;
        let extra = matches.count();
        if extra > 0 {
            return Err(CoreError::AmbiguousPlayer { name: name.to_string(), count: extra + 1 });
        }
        Ok(idx)
    }

    pub fn find_player_in_team(&self, name: &str, team: &str) -> Result<&Player> {
        let team = self.find_team(team)?;
        self.players
            .iter()
            .find(|p| p.plays_for(&team.name) && p.has_name(name))
            .ok_or_else(|| CoreError::PlayerNotFound(format!("{} ({})", name, team.name)))
    }

    /// Players whose team reference is exactly `team_name`.
    pub fn roster<'a>(&'a self, team_name: &'a str) -> impl Iterator<Item = &'a Player> + 'a {
        self.players.iter().filter(move |p| p.plays_for(team_name))
    }

    pub fn roster_indices(&self, team_name: &str) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.plays_for(team_name))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn search(&self, query: &PlayerQuery) -> Vec<&Player> {
        self.players.iter().filter(|p| query.matches(p)).collect()
    }

    /// Structural checks run after every load.
    pub fn validate(&self) -> Result<()> {
        let mut team_names = HashSet::new();
        for team in &self.teams {
            if team.name.trim().is_empty() {
                return Err(CoreError::Validation("team name must not be empty".to_string()));
            }
            if !team_names.insert(team.name.to_ascii_lowercase()) {
                return Err(CoreError::Validation(format!("duplicate team '{}'", team.name)));
            }
        }

        let mut player_keys = HashSet::new();
        for player in &self.players {
            player.validate()?;
            if !self.teams.iter().any(|t| t.name == player.team) {
                return Err(CoreError::Validation(format!(
                    "player '{}' references unknown team '{}'",
                    player.name, player.team
                )));
            }
            let key = (player.team.clone(), player.name.to_ascii_lowercase());
            if !player_keys.insert(key) {
                return Err(CoreError::Validation(format!(
                    "duplicate player '{}' in team '{}'",
                    player.name, player.team
                )));
            }
        }

        if let Some(bad) = self.match_history.iter().find(|m| !m.is_consistent()) {
            return Err(CoreError::Validation(format!("inconsistent match record '{}'", bad)));
        }
        for record in &self.match_history {
            self.check_history_team(&record.home_team, "match")?;
            self.check_history_team(&record.away_team, "match")?;
        }
        for record in &self.transfer_history {
            self.check_history_team(&record.from_team, "transfer")?;
            self.check_history_team(&record.to_team, "transfer")?;
        }

        Ok(())
    }

    fn check_history_team(&self, team: &str, kind: &str) -> Result<()> {
        if self.teams.iter().any(|t| t.name == team) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!("{} history references unknown team '{}'", kind, team)))
        }
    }
}

/// Player search filter. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct PlayerQuery {
    /// Case-insensitive substring of the player name.
    pub name: Option<String>,
    /// Case-insensitive substring of the team name.
    pub team: Option<String>,
    pub position: Option<Position>,
    pub min_rating: Option<u8>,
}

impl PlayerQuery {
    pub fn matches(&self, player: &Player) -> bool {
        let contains = |haystack: &str, needle: &Option<String>| match needle {
            Some(n) if !n.is_empty() => haystack.to_lowercase().contains(&n.to_lowercase()),
            _ => true,
        };

        contains(&player.name, &self.name)
            && contains(&player.team, &self.team)
            && self.position.map_or(true, |pos| player.position == pos)
            && self.min_rating.map_or(true, |min| player.rating >= min)
    }
}
