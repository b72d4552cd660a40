use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchEvent {
    /// 1..=duration
    pub minute: u16,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub is_home_team: bool,
    pub team: String,
    pub player: String,
}

impl MatchEvent {
    pub fn goal(minute: u16, is_home_team: bool, team: &str, player: &str) -> Self {
        Self::new(minute, EventType::Goal, is_home_team, team, player)
    }

    pub fn assist(minute: u16, is_home_team: bool, team: &str, player: &str) -> Self {
        Self::new(minute, EventType::Assist, is_home_team, team, player)
    }

    fn new(minute: u16, event_type: EventType, is_home_team: bool, team: &str, player: &str) -> Self {
        Self {
            minute,
            event_type,
            is_home_team,
            team: team.to_string(),
            player: player.to_string(),
        }
    }

    pub fn is_goal(&self) -> bool {
        self.event_type == EventType::Goal
    }

    pub fn is_assist(&self) -> bool {
        self.event_type == EventType::Assist
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    Assist,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventType::Goal => f.pad("GOAL"),
            EventType::Assist => f.pad("ASSIST"),
        }
    }
}
