use super::MatchEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final outcome of one simulated match.
///
/// Scores are derived from `events` at construction and are never set
/// independently, so the summary cannot drift from the detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u16,
    pub away_score: u16,
    pub duration: u16,
    /// Ascending by minute, ties in generation order.
    pub events: Vec<MatchEvent>,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchResult {
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        duration: u16,
        events: Vec<MatchEvent>,
        played_at: DateTime<Utc>,
    ) -> Self {
        let home_score = count_goals(&events, true);
        let away_score = count_goals(&events, false);
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score,
            away_score,
            duration,
            events,
            played_at,
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
        }
    }

    pub fn goals_by(&self, team: &str, player: &str) -> u32 {
        self.events.iter().filter(|e| e.is_goal() && e.team == team && e.player == player).count()
            as u32
    }

    pub fn assists_by(&self, team: &str, player: &str) -> u32 {
        self.events
            .iter()
            .filter(|e| e.is_assist() && e.team == team && e.player == player)
            .count() as u32
    }

    /// Checks the stored summary against the event list: scores equal goal
    /// counts, minutes are ordered and lie in `1..=duration`.
    pub fn is_consistent(&self) -> bool {
        let ordered = self.events.windows(2).all(|w| w[0].minute <= w[1].minute);
        let in_range = self.events.iter().all(|e| e.minute >= 1 && e.minute <= self.duration);
        let sides_match = self.events.iter().all(|e| {
            let expected = if e.is_home_team { &self.home_team } else { &self.away_team };
            &e.team == expected
        });

        ordered
            && in_range
            && sides_match
            && self.home_score == count_goals(&self.events, true)
            && self.away_score == count_goals(&self.events, false)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} - {} {}", self.home_team, self.home_score, self.away_score, self.away_team)
    }
}

fn count_goals(events: &[MatchEvent], home: bool) -> u16 {
    events.iter().filter(|e| e.is_goal() && e.is_home_team == home).count() as u16
}
