//! Match orchestration: strengths → events → result → stat updates.

use super::config::EngineConfig;
use super::generator::{EventGenerator, SideInput};
use super::strength::StrengthCalculator;
use crate::error::{CoreError, Result};
use crate::models::{EventType, MatchOutcome, MatchResult, Snapshot};
use chrono::Utc;
use rand::Rng;

#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    config: EngineConfig,
}

impl MatchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Simulates `home_team` against `away_team` and folds the result into
    /// the snapshot's player stats and team points.
    ///
    /// Every roster player of both teams is credited the full match duration.
    /// Two calls with the same inputs generally differ; pass a seeded rng for
    /// reproducible output.
    pub fn simulate_match<R>(
        &self,
        snapshot: &mut Snapshot,
        home_team: &str,
        away_team: &str,
        rng: &mut R,
    ) -> Result<MatchResult>
    where
        R: Rng + ?Sized,
    {
        let home_idx = snapshot.team_index(home_team)?;
        let away_idx = snapshot.team_index(away_team)?;
        if home_idx == away_idx {
            return Err(CoreError::Validation(format!(
                "{} cannot play against itself",
                snapshot.teams[home_idx].name
            )));
        }

        let duration = self.config.match_duration;
        let result = {
            let snap: &Snapshot = snapshot;
            let home_name = snap.teams[home_idx].name.as_str();
            let away_name = snap.teams[away_idx].name.as_str();

            let calculator = StrengthCalculator::new(self.config.home_advantage);
            let home_strength = calculator.calculate(home_name, snap.roster(home_name), true)?;
            let away_strength = calculator.calculate(away_name, snap.roster(away_name), false)?;

            let home = SideInput::from_roster(home_name, home_strength, snap.roster(home_name));
            let away = SideInput::from_roster(away_name, away_strength, snap.roster(away_name));
            let events: Vec<_> = EventGenerator::new(&self.config)
                .generate_events(&home, &away, duration, rng)?
                .collect();

            MatchResult::new(home_name, away_name, duration, events, Utc::now())
        };

        self.apply_result(snapshot, &result)?;

        log::info!("Match played: {}", result);
        Ok(result)
    }

    /// Applies a result to the snapshot. All event attributions are resolved
    /// before anything is written, so a bad result leaves the snapshot as it was.
    pub fn apply_result(&self, snapshot: &mut Snapshot, result: &MatchResult) -> Result<()> {
        let home_idx = snapshot.team_index(&result.home_team)?;
        let away_idx = snapshot.team_index(&result.away_team)?;

        let mut credits = Vec::with_capacity(result.events.len());
        for event in &result.events {
            let idx = snapshot
                .players
                .iter()
                .position(|p| p.plays_for(&event.team) && p.name == event.player)
                .ok_or_else(|| {
                    CoreError::PlayerNotFound(format!("{} ({})", event.player, event.team))
                })?;
            credits.push((idx, event.event_type));
        }

        for (idx, event_type) in credits {
            let stats = &mut snapshot.players[idx].stats;
            match event_type {
                EventType::Goal => {
                    stats.goals = stats.goals.saturating_add(1);
                    stats.shots_on_target = stats.shots_on_target.saturating_add(1);
                }
                EventType::Assist => stats.assists = stats.assists.saturating_add(1),
            }
        }

        let minutes = result.duration as u32;
        for team in [&result.home_team, &result.away_team] {
            for idx in snapshot.roster_indices(team) {
                let stats = &mut snapshot.players[idx].stats;
                stats.minutes_played = stats.minutes_played.saturating_add(minutes);
            }
        }

        let (home_points, away_points) = match result.outcome() {
            MatchOutcome::HomeWin => (self.config.points_for_win, 0),
            MatchOutcome::Draw => (self.config.points_for_draw, self.config.points_for_draw),
            MatchOutcome::AwayWin => (0, self.config.points_for_win),
        };
        let home = &mut snapshot.teams[home_idx];
        home.points = home.points.saturating_add(home_points);
        let away = &mut snapshot.teams[away_idx];
        away.points = away.points.saturating_add(away_points);

        Ok(())
    }
}
