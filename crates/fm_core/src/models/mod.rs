pub mod events;
pub mod match_result;
pub mod money;
pub mod player;
pub mod snapshot;
pub mod team;
pub mod transfer;

pub use events::{EventType, MatchEvent};
pub use match_result::{MatchOutcome, MatchResult};
pub use money::Money;
pub use player::{Player, PlayerStats, Position, MAX_RATING, MIN_RATING};
pub use snapshot::{PlayerQuery, Snapshot};
pub use team::Team;
pub use transfer::Transfer;
