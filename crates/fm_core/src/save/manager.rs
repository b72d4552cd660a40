use super::error::StoreError;
use super::format::{decode_snapshot, encode_snapshot};
use crate::models::Snapshot;

use std::fs::{rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where a [`SnapshotStore::persist`] call ended up writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedTo {
    Primary,
    Backup,
}

/// Primary data file plus a separate backup location.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    primary: PathBuf,
    backup: PathBuf,
}

impl SnapshotStore {
    pub fn new(primary: impl Into<PathBuf>, backup: impl Into<PathBuf>) -> Self {
        Self { primary: primary.into(), backup: backup.into() }
    }

    /// Backup defaults to `<primary>.backup.json` next to the primary file.
    pub fn with_default_backup(primary: impl Into<PathBuf>) -> Self {
        let primary = primary.into();
        let backup = primary.with_extension("backup.json");
        Self { primary, backup }
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let snapshot = load_from_path(&self.primary)?;
        log::info!(
            "Loaded {} teams and {} players from {:?}",
            snapshot.teams.len(),
            snapshot.players.len(),
            self.primary
        );
        Ok(snapshot)
    }

    pub fn load_backup(&self) -> Result<Snapshot, StoreError> {
        load_from_path(&self.backup)
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        save_to_path(&self.primary, snapshot)?;
        log::info!("Snapshot saved to {:?}", self.primary);
        Ok(())
    }

    /// Writes to the backup location only; the primary file is left alone.
    pub fn save_backup(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        save_to_path(&self.backup, snapshot)?;
        log::info!("Backup saved to {:?}", self.backup);
        Ok(())
    }

    /// Saves to the primary path, falling back to the backup when that fails.
    /// Returns the primary error only if the backup write fails as well.
    pub fn persist(&self, snapshot: &Snapshot) -> Result<SavedTo, StoreError> {
        match self.save(snapshot) {
            Ok(()) => Ok(SavedTo::Primary),
            Err(primary_err) => {
                log::warn!(
                    "Saving to {:?} failed ({}), writing backup to {:?}",
                    self.primary,
                    primary_err,
                    self.backup
                );
                match self.save_backup(snapshot) {
                    Ok(()) => Ok(SavedTo::Backup),
                    Err(backup_err) => {
                        log::error!("Backup save failed as well: {}", backup_err);
                        Err(primary_err)
                    }
                }
            }
        }
    }
}

fn save_to_path(path: &Path, snapshot: &Snapshot) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let data = encode_snapshot(snapshot)?;

    // Atomic save: write to temp file, then rename
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;
        file.sync_all()?;
    }
    rename(&temp_path, path)?;

    log::debug!("Wrote {} bytes to {:?}", data.len(), path);
    Ok(())
}

fn load_from_path(path: &Path) -> Result<Snapshot, StoreError> {
    if !path.exists() {
        return Err(StoreError::FileNotFound { path: path.display().to_string() });
    }
    let text = std::fs::read_to_string(path)?;
    decode_snapshot(&text)
}
