use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 99;

/// Player record as stored in the season snapshot.
///
/// `team` is a back-reference by team name. Roster membership is derived from
/// it, so a player always belongs to exactly one team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    pub team: String,
    pub position: Position,
    pub age: u8,
    /// 1..=99
    pub rating: u8,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(name: impl Into<String>, team: impl Into<String>, position: Position, age: u8, rating: u8) -> Self {
        Self {
            name: name.into(),
            team: team.into(),
            position,
            age,
            rating,
            stats: PlayerStats::default(),
        }
    }

    pub fn with_stats(mut self, stats: PlayerStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn plays_for(&self, team: &str) -> bool {
        self.team == team
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("player name must not be empty".to_string()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(CoreError::Validation(format!(
                "rating of {} must be within {}..={}, found {}",
                self.name, MIN_RATING, MAX_RATING, self.rating
            )));
        }
        if self.age == 0 {
            return Err(CoreError::InvalidAge { player: self.name.clone(), age: self.age });
        }
        Ok(())
    }
}

/// Cumulative season statistics. Counters only ever grow.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawPlayerStats")]
pub struct PlayerStats {
    pub goals: u32,
    pub assists: u32,
    pub minutes_played: u32,
    pub shots_on_target: u32,
}

impl PlayerStats {
    pub fn new(goals: u32, assists: u32, minutes_played: u32, shots_on_target: u32) -> Self {
        Self { goals, assists, minutes_played, shots_on_target }
    }

    pub fn goal_contributions(&self) -> u32 {
        self.goals.saturating_add(self.assists)
    }
}

/// Wire form of [`PlayerStats`]; every field is required but checked by hand so
/// a missing counter surfaces as [`CoreError::MalformedStats`].
#[derive(Debug, Deserialize)]
struct RawPlayerStats {
    goals: Option<u32>,
    assists: Option<u32>,
    minutes_played: Option<u32>,
    shots_on_target: Option<u32>,
}

impl TryFrom<RawPlayerStats> for PlayerStats {
    type Error = CoreError;

    fn try_from(raw: RawPlayerStats) -> Result<Self, Self::Error> {
        Ok(Self {
            goals: raw.goals.ok_or(CoreError::MalformedStats { field: "goals" })?,
            assists: raw.assists.ok_or(CoreError::MalformedStats { field: "assists" })?,
            minutes_played: raw
                .minutes_played
                .ok_or(CoreError::MalformedStats { field: "minutes_played" })?,
            shots_on_target: raw
                .shots_on_target
                .ok_or(CoreError::MalformedStats { field: "shots_on_target" })?,
        })
    }
}

/// Generic playing position.
///
/// Accepts full names and the usual abbreviations (GK, CB, CAM, ST ...) when
/// decoded, and always serializes to the full name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }
}

impl FromStr for Position {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gk" | "goalkeeper" | "keeper" => Ok(Position::Goalkeeper),
            "df" | "def" | "defender" | "cb" | "lb" | "rb" | "lwb" | "rwb" => Ok(Position::Defender),
            "mf" | "mid" | "midfielder" | "cdm" | "cm" | "cam" | "lm" | "rm" => {
                Ok(Position::Midfielder)
            }
            "fw" | "fwd" | "forward" | "striker" | "attacker" | "winger" | "st" | "cf" | "lw"
            | "rw" => Ok(Position::Forward),
            other => Err(CoreError::Validation(format!("unknown position '{}'", other))),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}
