use serde::{Deserialize, Serialize};

/// Team record. The roster is not stored here: players point at their team by
/// name and [`crate::models::Snapshot::roster`] derives membership from that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub league_position: u32,
    pub points: u32,
}

impl Team {
    pub fn new(name: impl Into<String>, league_position: u32, points: u32) -> Self {
        Self { name: name.into(), league_position, points }
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
