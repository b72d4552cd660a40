//! Read-only analytics over the season snapshot.

pub mod efficiency;
pub mod standings;
pub mod team_report;

pub use efficiency::{per_90, PlayerEfficiency};
pub use standings::{league_table, top_scorers, StandingRow};
pub use team_report::{LeaderEntry, TeamReport};
