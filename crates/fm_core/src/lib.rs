//! # fm_core - Football Manager Season Simulation Core
//!
//! Team and player records for one season, a stochastic match engine that
//! turns squad strength into timed goal/assist events, player valuation and
//! transfers, and read-only season analytics.
//!
//! ## Features
//! - Seeded simulation (same seed = same events)
//! - Match and transfer history persisted with the snapshot
//! - JSON store with atomic writes and a backup location
//!
//! ```rust
//! use fm_core::engine::EngineConfig;
//! use fm_core::models::{Player, Position, Snapshot, Team};
//! use fm_core::Session;
//!
//! let snapshot = Snapshot::new(
//!     vec![Team::new("Home", 1, 0), Team::new("Away", 2, 0)],
//!     vec![
//!         Player::new("Striker", "Home", Position::Forward, 25, 80),
//!         Player::new("Keeper", "Away", Position::Goalkeeper, 30, 75),
//!     ],
//! );
//! let mut session = Session::with_seed(snapshot, EngineConfig::default(), 42);
//! let result = session.simulate_match("Home", "Away").unwrap();
//! assert_eq!(session.match_history().len(), 1);
//! assert!(result.is_consistent());
//! ```

pub mod analysis;
pub mod engine;
pub mod error;
pub mod models;
pub mod save;
pub mod session;
pub mod transfer;

pub use error::{CoreError, ErrorKind, Result};
pub use save::{SavedTo, SnapshotStore, StoreError};
pub use session::{Persisted, Session, SharedSession};
