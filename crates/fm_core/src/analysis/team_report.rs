//! Team-level rollups over a roster.

use crate::error::{CoreError, Result};
use crate::models::{Player, Snapshot};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamReport {
    pub team_name: String,
    pub league_position: u32,
    pub points: u32,
    pub squad_size: usize,
    pub top_scorer: LeaderEntry,
    pub top_assister: LeaderEntry,
    pub total_goals: u32,
    pub total_assists: u32,
    pub squad_age_average: f64,
    pub squad_rating_average: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderEntry {
    pub name: String,
    pub count: u32,
}

impl TeamReport {
    /// Fails for unknown teams and for teams without players.
    pub fn generate(snapshot: &Snapshot, team_name: &str) -> Result<Self> {
        let team = snapshot.find_team(team_name)?;
        let players: Vec<&Player> = snapshot.roster(&team.name).collect();
        if players.is_empty() {
            return Err(CoreError::EmptyRoster(team.name.clone()));
        }

        let count = players.len() as f64;
        let total_age: u64 = players.iter().map(|p| p.age as u64).sum();
        let total_rating: u64 = players.iter().map(|p| p.rating as u64).sum();

        Ok(Self {
            team_name: team.name.clone(),
            league_position: team.league_position,
            points: team.points,
            squad_size: players.len(),
            top_scorer: leader(&players, |p| p.stats.goals),
            top_assister: leader(&players, |p| p.stats.assists),
            total_goals: saturating_total(&players, |p| p.stats.goals),
            total_assists: saturating_total(&players, |p| p.stats.assists),
            squad_age_average: total_age as f64 / count,
            squad_rating_average: total_rating as f64 / count,
        })
    }
}

fn saturating_total(players: &[&Player], key: impl Fn(&Player) -> u32) -> u32 {
    players.iter().fold(0u32, |acc, p| acc.saturating_add(key(p)))
}

/// First player with the highest count; roster order breaks ties.
fn leader(players: &[&Player], key: impl Fn(&Player) -> u32) -> LeaderEntry {
    let mut best = players[0];
    for player in &players[1..] {
        if key(player) > key(best) {
            best = player;
        }
    }
    LeaderEntry { name: best.name.clone(), count: key(best) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerStats, Position, Team};

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![Team::new("Napoli", 1, 70), Team::new("Empty", 20, 5)],
            vec![
                Player::new("Osimhen", "Napoli", Position::Forward, 24, 88)
                    .with_stats(PlayerStats::new(26, 4, 2_700, 55)),
                Player::new("Kvaratskhelia", "Napoli", Position::Forward, 22, 86)
                    .with_stats(PlayerStats::new(12, 10, 2_500, 30)),
                Player::new("Lobotka", "Napoli", Position::Midfielder, 28, 82)
                    .with_stats(PlayerStats::new(1, 10, 3_000, 3)),
            ],
        )
    }

    #[test]
    fn test_team_report_rollups() {
        let report = TeamReport::generate(&snapshot(), "napoli").unwrap();
        assert_eq!(report.team_name, "Napoli");
        assert_eq!(report.league_position, 1);
        assert_eq!(report.points, 70);
        assert_eq!(report.squad_size, 3);
        assert_eq!(report.top_scorer, LeaderEntry { name: "Osimhen".into(), count: 26 });
        // Tie on 10 assists: roster order wins.
        assert_eq!(report.top_assister, LeaderEntry { name: "Kvaratskhelia".into(), count: 10 });
        assert_eq!(report.total_goals, 39);
        assert_eq!(report.total_assists, 24);
        assert!((report.squad_age_average - 74.0 / 3.0).abs() < 1e-9);
        assert!((report.squad_rating_average - 256.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_errors() {
        let snap = snapshot();
        assert_eq!(TeamReport::generate(&snap, "Empty"), Err(CoreError::EmptyRoster("Empty".into())));
        assert!(matches!(TeamReport::generate(&snap, "Lazio"), Err(CoreError::TeamNotFound(_))));
    }
}
