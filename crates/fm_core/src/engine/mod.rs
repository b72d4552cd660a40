//! Match simulation engine.
//!
//! - [`strength`]: team strength from roster ratings and venue
//! - [`generator`]: lazy goal/assist event stream
//! - [`match_engine`]: orchestration and stat updates

pub mod config;
pub mod generator;
pub mod match_engine;
pub mod sampling;
pub mod strength;

pub use config::{EngineConfig, MinutePolicy, MAX_BASE_GOAL_RATE, MAX_GOAL_SIGMA, MAX_LATE_SURGE_SLOPE};
pub use generator::{EventGenerator, EventStream, SideInput, MAX_GOALS_PER_SIDE};
pub use match_engine::MatchEngine;
pub use sampling::{weighted_choice, weighted_choice_excluding};
pub use strength::{strength, StrengthCalculator, HOME_ADVANTAGE};
