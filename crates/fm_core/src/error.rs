use thiserror::Error;

/// Domain errors raised by the simulation, transfer and analytics layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Player name '{name}' matches {count} players, qualify it with a team")]
    AmbiguousPlayer { name: String, count: usize },

    #[error("Team '{0}' has no players")]
    EmptyRoster(String),

    #[error("Invalid match duration: {0} minutes")]
    InvalidDuration(u16),

    #[error("Invalid age for {player}: {age}")]
    InvalidAge { player: String, age: u8 },

    #[error("Malformed stats: missing field '{field}'")]
    MalformedStats { field: &'static str },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Coarse error classes used by callers to decide how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    EmptyRoster,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::TeamNotFound(_)
            | CoreError::PlayerNotFound(_)
            | CoreError::AmbiguousPlayer { .. } => ErrorKind::NotFound,
            CoreError::EmptyRoster(_) => ErrorKind::EmptyRoster,
            CoreError::InvalidDuration(_)
            | CoreError::InvalidAge { .. }
            | CoreError::MalformedStats { .. }
            | CoreError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Every domain error rejects a single operation and leaves the session usable.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
