//! # Event Generator
//!
//! Turns two side strengths into a time-ordered stream of goal and assist
//! events.
//!
//! ## 기본 원리
//! - Expected goals per side scale with strength *relative* to the opponent:
//!   `λ = base_rate * s_side / (s_home + s_away) * duration / 90`
//! - Goal counts follow a rounded Gaussian `N(λ, σ)`, floored at zero
//! - Scorers and assisters are drawn with probability proportional to rating
//!
//! Minutes and sides are fixed when the stream is created; players are drawn
//! lazily as the stream is consumed.

use super::config::{EngineConfig, MinutePolicy, MAX_LATE_SURGE_SLOPE};
use super::sampling::{weighted_choice, weighted_choice_excluding};
use crate::error::{CoreError, Result};
use crate::models::{MatchEvent, Player};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::Normal;

const REFERENCE_DURATION: f64 = 90.0;

/// Hard ceiling on the goals one side can score in a match.
pub const MAX_GOALS_PER_SIDE: u32 = 30;

/// One side of a fixture as seen by the generator.
#[derive(Debug, Clone)]
pub struct SideInput<'a> {
    pub team: &'a str,
    pub strength: f64,
    /// `(player name, selection weight)`
    pub squad: Vec<(&'a str, f64)>,
}

impl<'a> SideInput<'a> {
    pub fn new(team: &'a str, strength: f64, squad: Vec<(&'a str, f64)>) -> Self {
        Self { team, strength, squad }
    }

    /// Squad weighted by player rating.
    pub fn from_roster<I>(team: &'a str, strength: f64, roster: I) -> Self
    where
        I: IntoIterator<Item = &'a Player>,
    {
        let squad = roster.into_iter().map(|p| (p.name.as_str(), p.rating as f64)).collect();
        Self { team, strength, squad }
    }
}

#[derive(Debug, Clone)]
pub struct EventGenerator<'c> {
    config: &'c EngineConfig,
}

impl<'c> EventGenerator<'c> {
    pub fn new(config: &'c EngineConfig) -> Self {
        Self { config }
    }

    /// Expected goals for `(home, away)`.
    pub fn expected_goals(&self, home_strength: f64, away_strength: f64, duration: u16) -> (f64, f64) {
        let total = home_strength + away_strength;
        let scale = self.config.base_goal_rate * duration as f64 / REFERENCE_DURATION;
        (scale * home_strength / total, scale * away_strength / total)
    }

    pub fn generate_events<'a, R>(
        &self,
        home: &'a SideInput<'a>,
        away: &'a SideInput<'a>,
        duration_minutes: u16,
        rng: &'a mut R,
    ) -> Result<EventStream<'a, R>>
    where
        R: Rng + ?Sized,
    {
        if duration_minutes == 0 {
            return Err(CoreError::InvalidDuration(duration_minutes));
        }
        for side in [home, away] {
            if side.squad.is_empty() {
                return Err(CoreError::EmptyRoster(side.team.to_string()));
            }
            if !(side.strength.is_finite() && side.strength > 0.0) {
                return Err(CoreError::Validation(format!(
                    "strength of {} must be positive, found {}",
                    side.team, side.strength
                )));
            }
            if side.squad.iter().any(|(_, w)| !(w.is_finite() && *w > 0.0)) {
                return Err(CoreError::Validation(format!(
                    "selection weights of {} must be positive",
                    side.team
                )));
            }
        }

        let (lambda_home, lambda_away) =
            self.expected_goals(home.strength, away.strength, duration_minutes);
        let home_goals = draw_goal_count(rng, lambda_home, self.config.goal_sigma)?;
        let away_goals = draw_goal_count(rng, lambda_away, self.config.goal_sigma)?;

        log::debug!(
            "{} (s={:.2}, λ={:.2}) vs {} (s={:.2}, λ={:.2}) -> {}:{}",
            home.team,
            home.strength,
            lambda_home,
            away.team,
            away.strength,
            lambda_away,
            home_goals,
            away_goals
        );

        let minutes = MinuteSampler::new(self.config.minute_policy, duration_minutes)?;
        let mut slots: Vec<GoalSlot> = Vec::with_capacity((home_goals + away_goals) as usize);
        for _ in 0..home_goals {
            slots.push(GoalSlot { minute: minutes.sample(rng), is_home: true });
        }
        for _ in 0..away_goals {
            slots.push(GoalSlot { minute: minutes.sample(rng), is_home: false });
        }
        // Stable: equal minutes keep generation order.
        slots.sort_by_key(|slot| slot.minute);

        Ok(EventStream {
            home,
            away,
            slots: slots.into_iter(),
            pending_assist: None,
            assist_probability: self.config.assist_probability.clamp(0.0, 1.0),
            rng,
        })
    }
}

fn draw_goal_count<R: Rng + ?Sized>(rng: &mut R, lambda: f64, sigma: f64) -> Result<u32> {
    let normal = Normal::new(lambda, sigma)
        .map_err(|e| CoreError::Validation(format!("goal distribution: {}", e)))?;
    let draw = normal.sample(rng).round();
    Ok(if draw.is_finite() && draw > 0.0 {
        (draw as u32).min(MAX_GOALS_PER_SIDE)
    } else {
        0
    })
}

#[derive(Debug, Clone, Copy)]
struct GoalSlot {
    minute: u16,
    is_home: bool,
}

enum MinuteSampler {
    Uniform(u16),
    Weighted(WeightedIndex<f64>),
}

impl MinuteSampler {
    fn new(policy: MinutePolicy, duration: u16) -> Result<Self> {
        match policy {
            MinutePolicy::Uniform => Ok(MinuteSampler::Uniform(duration)),
            MinutePolicy::LateSurge { slope } => {
                if !(0.0..=MAX_LATE_SURGE_SLOPE).contains(&slope) {
                    return Err(CoreError::Validation(format!(
                        "late surge slope must be within 0.0..={}, found {}",
                        MAX_LATE_SURGE_SLOPE, slope
                    )));
                }
                let span = (duration.max(2) - 1) as f64;
                let weights = (1..=duration).map(|m| 1.0 + slope * (m - 1) as f64 / span);
                WeightedIndex::new(weights)
                    .map(MinuteSampler::Weighted)
                    .map_err(|e| CoreError::Validation(format!("minute weights: {}", e)))
            }
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u16 {
        match self {
            MinuteSampler::Uniform(duration) => rng.gen_range(1..=*duration),
            MinuteSampler::Weighted(index) => index.sample(rng) as u16 + 1,
        }
    }
}

/// Lazy, minute-ordered event sequence. Each GOAL is directly followed by its
/// ASSIST when one was drawn.
pub struct EventStream<'a, R: Rng + ?Sized> {
    home: &'a SideInput<'a>,
    away: &'a SideInput<'a>,
    slots: std::vec::IntoIter<GoalSlot>,
    pending_assist: Option<MatchEvent>,
    assist_probability: f64,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> EventStream<'a, R> {
    /// Goals not yet emitted.
    pub fn remaining_goals(&self) -> usize {
        self.slots.len()
    }
}

impl<'a, R: Rng + ?Sized> Iterator for EventStream<'a, R> {
    type Item = MatchEvent;

    fn next(&mut self) -> Option<MatchEvent> {
        if let Some(assist) = self.pending_assist.take() {
            return Some(assist);
        }

        let slot = self.slots.next()?;
        let side = if slot.is_home { self.home } else { self.away };
        // Squads are checked non-empty with positive weights before streaming.
        let scorer = *weighted_choice(&mut *self.rng, &side.squad)?;

        // Fewer than two players: no assist, silently.
        if side.squad.len() >= 2 && self.rng.gen_bool(self.assist_probability) {
            if let Some(assister) = weighted_choice_excluding(&mut *self.rng, &side.squad, &scorer) {
                self.pending_assist =
                    Some(MatchEvent::assist(slot.minute, slot.is_home, side.team, assister));
            }
        }

        Some(MatchEvent::goal(slot.minute, slot.is_home, side.team, scorer))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending_assist.is_some());
        let goals = self.slots.len();
        (goals + pending, Some(goals * 2 + pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn side<'a>(team: &'a str, strength: f64, names: &'a [&'a str]) -> SideInput<'a> {
        SideInput::new(team, strength, names.iter().map(|n| (*n, 75.0)).collect())
    }

    const HOME: [&str; 3] = ["Alisson", "Salah", "Diaz"];
    const AWAY: [&str; 3] = ["Ederson", "Foden", "Haaland"];

    #[test]
    fn test_zero_duration_is_rejected() {
        let cfg = EngineConfig::default();
        let (home, away) = (side("Home", 80.0, &HOME), side("Away", 80.0, &AWAY));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = EventGenerator::new(&cfg).generate_events(&home, &away, 0, &mut rng);
        assert!(matches!(result, Err(CoreError::InvalidDuration(0))));
    }

    #[test]
    fn test_empty_squad_is_rejected() {
        let cfg = EngineConfig::default();
        let home = side("Home", 80.0, &HOME);
        let away = SideInput::new("Away", 80.0, Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = EventGenerator::new(&cfg).generate_events(&home, &away, 90, &mut rng);
        assert!(matches!(result, Err(CoreError::EmptyRoster(_))));
    }

    #[test]
    fn test_expected_goals_follow_relative_strength() {
        let cfg = EngineConfig::default();
        let generator = EventGenerator::new(&cfg);

        let (h, a) = generator.expected_goals(90.0, 30.0, 90);
        assert!((h - 2.7 * 0.75).abs() < 1e-9);
        assert!((a - 2.7 * 0.25).abs() < 1e-9);

        // Doubling both strengths changes nothing.
        let (h2, a2) = generator.expected_goals(180.0, 60.0, 90);
        assert!((h - h2).abs() < 1e-9 && (a - a2).abs() < 1e-9);

        // Half a match, half the goals.
        let (h3, _) = generator.expected_goals(90.0, 30.0, 45);
        assert!((h3 - h / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_player_side_never_assists() {
        let cfg = EngineConfig { base_goal_rate: 8.0, assist_probability: 1.0, ..Default::default() };
        let lone = ["Lone Wolf"];
        let home = side("Home", 90.0, &lone);
        let away = side("Away", 10.0, &AWAY);

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let events: Vec<_> = EventGenerator::new(&cfg)
                .generate_events(&home, &away, 90, &mut rng)
                .unwrap()
                .collect();
            assert!(events.iter().filter(|e| e.is_home_team).all(|e| e.is_goal()));
        }
    }

    #[test]
    fn test_assist_always_follows_goal_of_other_player() {
        let cfg = EngineConfig { base_goal_rate: 6.0, assist_probability: 1.0, ..Default::default() };
        let (home, away) = (side("Home", 80.0, &HOME), side("Away", 70.0, &AWAY));

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let events: Vec<_> = EventGenerator::new(&cfg)
                .generate_events(&home, &away, 90, &mut rng)
                .unwrap()
                .collect();
            for pair in events.windows(2) {
                if pair[1].is_assist() {
                    assert!(pair[0].is_goal());
                    assert_eq!(pair[0].minute, pair[1].minute);
                    assert_eq!(pair[0].team, pair[1].team);
                    assert_ne!(pair[0].player, pair[1].player);
                }
            }
            let goals = events.iter().filter(|e| e.is_goal()).count();
            let assists = events.iter().filter(|e| e.is_assist()).count();
            assert_eq!(goals, assists, "every goal should carry an assist at p=1.0");
        }
    }

    #[test]
    fn test_stronger_side_scores_more_on_average() {
        let cfg = EngineConfig::default();
        let (home, away) = (side("Home", 95.0, &HOME), side("Away", 40.0, &AWAY));
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let generator = EventGenerator::new(&cfg);

        let (mut home_goals, mut away_goals) = (0, 0);
        for _ in 0..2_000 {
            for event in generator.generate_events(&home, &away, 90, &mut rng).unwrap() {
                match (event.is_goal(), event.is_home_team) {
                    (true, true) => home_goals += 1,
                    (true, false) => away_goals += 1,
                    _ => {}
                }
            }
        }
        // λ 1.9 vs 0.81
        assert!(home_goals as f64 > away_goals as f64 * 1.5, "home {} vs away {}", home_goals, away_goals);
    }

    #[test]
    fn test_late_surge_shifts_goals_late() {
        let cfg = EngineConfig {
            base_goal_rate: 6.0,
            minute_policy: MinutePolicy::LateSurge { slope: 3.0 },
            ..Default::default()
        };
        let (home, away) = (side("Home", 80.0, &HOME), side("Away", 80.0, &AWAY));
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let generator = EventGenerator::new(&cfg);

        let (mut first_half, mut second_half) = (0, 0);
        for _ in 0..1_000 {
            for event in generator.generate_events(&home, &away, 90, &mut rng).unwrap() {
                if event.is_goal() {
                    if event.minute <= 45 {
                        first_half += 1;
                    } else {
                        second_half += 1;
                    }
                }
            }
        }
        assert!(second_half > first_half, "first {} second {}", first_half, second_half);
    }

    #[test]
    fn test_goal_count_is_capped_per_side() {
        // Bypasses EngineConfig::validate on purpose.
        let cfg = EngineConfig { base_goal_rate: 1e12, ..Default::default() };
        let (home, away) = (side("Home", 80.0, &HOME), side("Away", 80.0, &AWAY));
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let events: Vec<_> = EventGenerator::new(&cfg)
            .generate_events(&home, &away, 90, &mut rng)
            .unwrap()
            .collect();
        let home_goals = events.iter().filter(|e| e.is_goal() && e.is_home_team).count();
        let away_goals = events.iter().filter(|e| e.is_goal() && !e.is_home_team).count();
        assert_eq!(home_goals, MAX_GOALS_PER_SIDE as usize);
        assert_eq!(away_goals, MAX_GOALS_PER_SIDE as usize);
    }

    #[test]
    fn test_extreme_late_surge_is_rejected() {
        let cfg = EngineConfig {
            minute_policy: MinutePolicy::LateSurge { slope: 1e307 },
            ..Default::default()
        };
        let (home, away) = (side("Home", 80.0, &HOME), side("Away", 80.0, &AWAY));
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let result = EventGenerator::new(&cfg).generate_events(&home, &away, 90, &mut rng);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_same_seed_same_events() {
        let cfg = EngineConfig::default();
        let (home, away) = (side("Home", 80.0, &HOME), side("Away", 70.0, &AWAY));
        let generator = EventGenerator::new(&cfg);

        let mut rng_a = ChaCha8Rng::seed_from_u64(5);
        let mut rng_b = ChaCha8Rng::seed_from_u64(5);
        let a: Vec<_> = generator.generate_events(&home, &away, 90, &mut rng_a).unwrap().collect();
        let b: Vec<_> = generator.generate_events(&home, &away, 90, &mut rng_b).unwrap().collect();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_events_ordered_and_in_range(
            seed in any::<u64>(),
            duration in 1u16..=130,
            home_strength in 1.0f64..110.0,
            away_strength in 1.0f64..110.0,
            late in any::<bool>(),
        ) {
            let cfg = EngineConfig {
                base_goal_rate: 5.0,
                minute_policy: if late { MinutePolicy::LateSurge { slope: 2.0 } } else { MinutePolicy::Uniform },
                ..Default::default()
            };
            let home = side("Home", home_strength, &HOME);
            let away = side("Away", away_strength, &AWAY);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let events: Vec<_> = EventGenerator::new(&cfg)
                .generate_events(&home, &away, duration, &mut rng)
                .unwrap()
                .collect();

            for pair in events.windows(2) {
                prop_assert!(pair[0].minute <= pair[1].minute);
            }
            for event in &events {
                prop_assert!(event.minute >= 1 && event.minute <= duration);
                let roster: &[&str] = if event.is_home_team { &HOME } else { &AWAY };
                prop_assert!(roster.contains(&event.player.as_str()));
            }
        }
    }
}
