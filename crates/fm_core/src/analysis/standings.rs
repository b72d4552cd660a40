use crate::models::{Player, Snapshot};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingRow {
    pub rank: usize,
    pub team: String,
    pub points: u32,
    pub played: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl StandingRow {
    fn record(&mut self, scored: u16, conceded: u16) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored as u32);
        self.goals_against = self.goals_against.saturating_add(conceded as u32);
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

/// Teams by points (desc), then stored league position, then name.
/// Played/goal columns come from the match history.
pub fn league_table(snapshot: &Snapshot) -> Vec<StandingRow> {
    let mut teams: Vec<_> = snapshot.teams.iter().collect();
    teams.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(a.league_position.cmp(&b.league_position))
            .then_with(|| a.name.cmp(&b.name))
    });

    teams
        .into_iter()
        .enumerate()
        .map(|(i, team)| {
            let mut row = StandingRow {
                rank: i + 1,
                team: team.name.clone(),
                points: team.points,
                played: 0,
                goals_for: 0,
                goals_against: 0,
            };
            for result in &snapshot.match_history {
                if result.home_team == team.name {
                    row.record(result.home_score, result.away_score);
                } else if result.away_team == team.name {
                    row.record(result.away_score, result.home_score);
                }
            }
            row
        })
        .collect()
}

/// Top `limit` players by goals, assists breaking ties.
pub fn top_scorers(snapshot: &Snapshot, limit: usize) -> Vec<&Player> {
    let mut players: Vec<&Player> = snapshot.players.iter().filter(|p| p.stats.goals > 0).collect();
    players.sort_by(|a, b| {
        b.stats.goals.cmp(&a.stats.goals).then(b.stats.assists.cmp(&a.stats.assists))
    });
    players.truncate(limit);
    players
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchEvent, MatchResult, PlayerStats, Position, Team};
    use chrono::Utc;

    fn snapshot() -> Snapshot {
        let mut snap = Snapshot::new(
            vec![Team::new("Ajax", 2, 6), Team::new("PSV", 1, 6), Team::new("Feyenoord", 3, 9)],
            vec![
                Player::new("Bergwijn", "Ajax", Position::Forward, 26, 80)
                    .with_stats(PlayerStats::new(5, 2, 900, 12)),
                Player::new("De Jong", "PSV", Position::Forward, 34, 79)
                    .with_stats(PlayerStats::new(5, 4, 900, 10)),
                Player::new("Gimenez", "Feyenoord", Position::Forward, 23, 81)
                    .with_stats(PlayerStats::new(9, 1, 900, 15)),
                Player::new("Bijlow", "Feyenoord", Position::Goalkeeper, 26, 77),
            ],
        );
        snap.match_history.push(MatchResult::new(
            "Ajax",
            "PSV",
            90,
            vec![MatchEvent::goal(30, true, "Ajax", "Bergwijn"), MatchEvent::goal(70, false, "PSV", "De Jong")],
            Utc::now(),
        ));
        snap
    }

    #[test]
    fn test_table_order_and_goal_columns() {
        let table = league_table(&snapshot());
        let order: Vec<&str> = table.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(order, vec!["Feyenoord", "PSV", "Ajax"]);
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[1].played, 1);
        assert_eq!(table[2].goals_for, 1);
        assert_eq!(table[2].goal_difference(), 0);
        assert_eq!(table[0].played, 0);
    }

    #[test]
    fn test_top_scorers() {
        let snap = snapshot();
        let names: Vec<&str> = top_scorers(&snap, 2).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Gimenez", "De Jong"]);
        assert_eq!(top_scorers(&snap, 10).len(), 3);
    }
}
