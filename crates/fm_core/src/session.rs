//! Session context: the one owner of the season snapshot.
//!
//! A [`Session`] holds the snapshot (with its match and transfer histories),
//! the match engine and the random number generator. Single-threaded callers
//! use it directly through `&mut Session`; concurrent callers share it through
//! [`SharedSession`], which serializes every mutate-then-persist sequence
//! under one write lock.

use crate::analysis::{self, PlayerEfficiency, StandingRow, TeamReport};
use crate::engine::{EngineConfig, MatchEngine};
use crate::error::Result;
use crate::models::{MatchResult, Money, Player, PlayerQuery, Snapshot, Team, Transfer};
use crate::save::{SavedTo, SnapshotStore, StoreError};
use crate::transfer::{calculate_value, TransferMarket};
use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct Session {
    snapshot: Snapshot,
    engine: MatchEngine,
    rng: ChaCha8Rng,
}

impl Session {
    /// Session with an entropy-seeded generator.
    pub fn new(snapshot: Snapshot, config: EngineConfig) -> Self {
        Self { snapshot, engine: MatchEngine::new(config), rng: ChaCha8Rng::from_entropy() }
    }

    /// Session whose match results are reproducible for a given seed.
    pub fn with_seed(snapshot: Snapshot, config: EngineConfig, seed: u64) -> Self {
        Self { snapshot, engine: MatchEngine::new(config), rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Loads the primary store. A missing or malformed store is fatal here;
    /// the backup is not consulted.
    pub fn open(
        store: &SnapshotStore,
        config: EngineConfig,
        seed: Option<u64>,
    ) -> std::result::Result<Self, StoreError> {
        let snapshot = store.load()?;
        Ok(match seed {
            Some(seed) => Self::with_seed(snapshot, config, seed),
            None => Self::new(snapshot, config),
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    pub fn match_history(&self) -> &[MatchResult] {
        &self.snapshot.match_history
    }

    pub fn transfer_history(&self) -> &[Transfer] {
        &self.snapshot.transfer_history
    }

    // ========== Mutations ==========

    /// Plays one match and records it in the match history.
    pub fn simulate_match(&mut self, home_team: &str, away_team: &str) -> Result<MatchResult> {
        let result =
            self.engine.simulate_match(&mut self.snapshot, home_team, away_team, &mut self.rng)?;
        self.snapshot.match_history.push(result.clone());
        Ok(result)
    }

    pub fn transfer_player(&mut self, player_name: &str, destination: &str) -> Result<Transfer> {
        let record =
            TransferMarket::transfer_player(&mut self.snapshot, player_name, destination, Utc::now())?;
        self.snapshot.transfer_history.push(record.clone());
        Ok(record)
    }

    /// Like [`Session::transfer_player`], for names shared across teams.
    pub fn transfer_player_from(
        &mut self,
        player_name: &str,
        source: &str,
        destination: &str,
    ) -> Result<Transfer> {
        let record = TransferMarket::transfer_player_from(
            &mut self.snapshot,
            player_name,
            source,
            destination,
            Utc::now(),
        )?;
        self.snapshot.transfer_history.push(record.clone());
        Ok(record)
    }

    pub fn persist(&self, store: &SnapshotStore) -> std::result::Result<SavedTo, StoreError> {
        store.persist(&self.snapshot)
    }

    pub fn save_backup(&self, store: &SnapshotStore) -> std::result::Result<(), StoreError> {
        store.save_backup(&self.snapshot)
    }

    // ========== Lookups & analytics ==========

    pub fn find_team(&self, name: &str) -> Result<&Team> {
        self.snapshot.find_team(name)
    }

    /// Player by name, optionally restricted to one team.
    pub fn find_player(&self, name: &str, team: Option<&str>) -> Result<&Player> {
        match team {
            Some(team) => self.snapshot.find_player_in_team(name, team),
            None => self.snapshot.find_player(name),
        }
    }

    pub fn value(&self, name: &str, team: Option<&str>) -> Result<Money> {
        calculate_value(self.find_player(name, team)?)
    }

    pub fn efficiency(&self, name: &str, team: Option<&str>) -> Result<PlayerEfficiency> {
        self.find_player(name, team).map(PlayerEfficiency::of)
    }

    pub fn team_report(&self, team: &str) -> Result<TeamReport> {
        TeamReport::generate(&self.snapshot, team)
    }

    pub fn league_table(&self) -> Vec<StandingRow> {
        analysis::league_table(&self.snapshot)
    }

    pub fn top_scorers(&self, limit: usize) -> Vec<&Player> {
        analysis::top_scorers(&self.snapshot, limit)
    }

    pub fn search(&self, query: &PlayerQuery) -> Vec<&Player> {
        self.snapshot.search(query)
    }
}

/// Outcome of [`SharedSession::write_and_persist`].
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub saved: std::result::Result<SavedTo, StoreError>,
}

/// Thread-safe handle to a [`Session`].
///
/// Reads run concurrently with each other; a write excludes every other
/// access. A poisoned lock is recovered, since each mutation validates before
/// it writes and cannot leave the snapshot half-updated.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<RwLock<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self { inner: Arc::new(RwLock::new(session)) }
    }

    pub fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        f(&self.read_guard())
    }

    pub fn write<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        f(&mut self.write_guard())
    }

    /// Runs `f` and persists the result without releasing the write lock in
    /// between. Nothing is saved when `f` fails.
    ///
    /// Once `f` succeeds its changes stay in the session even if both the
    /// primary and the backup write fail, so the value is always returned
    /// next to the save outcome.
    pub fn write_and_persist<T>(
        &self,
        store: &SnapshotStore,
        f: impl FnOnce(&mut Session) -> Result<T>,
    ) -> Result<Persisted<T>> {
        let mut session = self.write_guard();
        let value = f(&mut session)?;
        let saved = session.persist(store);
        Ok(Persisted { value, saved })
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
