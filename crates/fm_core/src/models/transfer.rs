use super::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Completed transfer. Appended to the transfer history, never edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transfer {
    pub player: String,
    pub from_team: String,
    pub to_team: String,
    pub fee: Money,
    pub date: DateTime<Utc>,
}
