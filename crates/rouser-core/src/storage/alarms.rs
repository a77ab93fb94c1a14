//! Durable storage for the alarm set.
//!
//! The store owns every [`Alarm`] record and is their single writer. On
//! disk the set is one JSON document of records in creation order; saves
//! replace it atomically (write to a temp file, then rename), so a failed
//! save never leaves a partial document behind. Load and save each retry
//! once before surfacing an error, and the in-memory set stays
//! authoritative either way.

use std::path::{Path, PathBuf};

use crate::alarm::{Alarm, FireTime};
use crate::error::{StorageError, StoreError};

use super::data_dir;

const ALARMS_FILE: &str = "alarms.json";

pub struct AlarmStore {
    path: PathBuf,
    alarms: Vec<Alarm>,
}

impl AlarmStore {
    /// Open the store at `~/.config/rouser/alarms.json`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared or the
    /// document exists but cannot be read or parsed.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(data_dir()?.join(ALARMS_FILE))
    }

    /// Open the store backed by an explicit path. A missing file is an
    /// empty alarm set, not an error.
    pub fn open_at(path: PathBuf) -> Result<Self, StorageError> {
        let alarms = Self::load_from(&path)?;
        Ok(Self { path, alarms })
    }

    fn load_from(path: &Path) -> Result<Vec<Alarm>, StorageError> {
        let content = match retry_once("alarm load", || std::fs::read_to_string(path)) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| StorageError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist the full set. All-or-nothing: the document is written to a
    /// temp file and renamed over the old one.
    ///
    /// # Errors
    /// Returns an error once the internal retry has also failed; the
    /// in-memory set is untouched and remains authoritative.
    pub fn save(&self) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(&self.alarms)
            .map_err(StorageError::EncodeFailed)?;
        let tmp = self.path.with_extension("json.tmp");
        retry_once("alarm save", || {
            std::fs::write(&tmp, &content)?;
            std::fs::rename(&tmp, &self.path)
        })
        .map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Allocate a new alarm: fresh id, enabled, never fired. Never fails.
    pub fn create(&mut self, fire_time: FireTime, label: String, track_ids: Vec<String>) -> &Alarm {
        self.alarms.push(Alarm::new(fire_time, label, track_ids));
        self.alarms.last().expect("just pushed")
    }

    /// Apply a field change to the alarm with the given id.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the id is absent.
    pub fn update(
        &mut self,
        id: &str,
        mutator: impl FnOnce(&mut Alarm),
    ) -> Result<(), StoreError> {
        match self.alarms.iter_mut().find(|a| a.id == id) {
            Some(alarm) => {
                mutator(alarm);
                Ok(())
            }
            None => Err(StoreError::NotFound { id: id.to_string() }),
        }
    }

    /// Remove the alarm with the given id. Removing an absent id is a
    /// no-op, so duplicate cancel requests are harmless; returns whether a
    /// record was actually removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.alarms.len();
        self.alarms.retain(|a| a.id != id);
        self.alarms.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&Alarm> {
        self.alarms.iter().find(|a| a.id == id)
    }

    /// All alarms in creation order.
    pub fn list(&self) -> &[Alarm] {
        &self.alarms
    }

    /// Mutable view for the scheduler's `last_fired` bookkeeping.
    pub(crate) fn alarms_mut(&mut self) -> &mut [Alarm] {
        &mut self.alarms
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }
}

/// Run a fallible storage operation, retrying once on failure.
fn retry_once<T>(
    what: &str,
    mut op: impl FnMut() -> std::io::Result<T>,
) -> std::io::Result<T> {
    match op() {
        Ok(v) => Ok(v),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(e),
        Err(first) => {
            log::warn!("{what} failed, retrying once: {first}");
            op()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::clock::MinuteKey;

    fn store() -> (AlarmStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = AlarmStore::open_at(dir.path().join("alarms.json")).unwrap();
        (store, dir)
    }

    fn fire_time(hour: u32, minute: u32) -> FireTime {
        FireTime::new(hour, minute).unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty_set() {
        let (store, _dir) = store();
        assert!(store.is_empty());
    }

    #[test]
    fn list_preserves_creation_order() {
        let (mut store, _dir) = store();
        let a = store.create(fire_time(7, 0), "a".into(), vec![]).id.clone();
        let b = store.create(fire_time(6, 0), "b".into(), vec![]).id.clone();
        let c = store.create(fire_time(8, 0), "c".into(), vec![]).id.clone();
        let ids: Vec<_> = store.list().iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, [a, b, c]);
    }

    #[test]
    fn save_load_round_trips_the_exact_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alarms.json");

        let mut store = AlarmStore::open_at(path.clone()).unwrap();
        store.create(fire_time(7, 0), "wake".into(), vec!["t1".into(), "t2".into()]);
        store.create(fire_time(22, 30), "wind down".into(), vec![]);
        let at = chrono::Local.with_ymd_and_hms(2025, 6, 1, 7, 0, 0).unwrap();
        let key = MinuteKey::of(at);
        let id = store.list()[0].id.clone();
        store.update(&id, |a| a.last_fired = Some(key)).unwrap();
        store.save().unwrap();

        let reloaded = AlarmStore::open_at(path).unwrap();
        assert_eq!(reloaded.len(), 2);
        let (a, b) = (&reloaded.list()[0], &reloaded.list()[1]);
        assert_eq!(a.id, store.list()[0].id);
        assert_eq!(a.fire_time, fire_time(7, 0));
        assert_eq!(a.label, "wake");
        assert_eq!(a.track_ids, ["t1", "t2"]);
        assert_eq!(a.last_fired, Some(key));
        assert_eq!(b.id, store.list()[1].id);
        assert!(b.last_fired.is_none());
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let (mut store, _dir) = store();
        let err = store.update("nope", |a| a.enabled = false).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn remove_is_idempotent() {
        let (mut store, _dir) = store();
        let id = store.create(fire_time(7, 0), String::new(), vec![]).id.clone();
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn transient_failure_is_retried_once_then_succeeds() {
        let mut calls = 0;
        let result = retry_once("test op", || {
            calls += 1;
            if calls == 1 {
                Err(std::io::Error::other("transient"))
            } else {
                Ok(42)
            }
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 2);
    }

    #[test]
    fn persistent_failure_surfaces_after_the_retry() {
        let mut calls = 0;
        let result: std::io::Result<()> = retry_once("test op", || {
            calls += 1;
            Err(std::io::Error::other("still broken"))
        });
        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn missing_file_is_not_retried() {
        let mut calls = 0;
        let result: std::io::Result<()> = retry_once("test op", || {
            calls += 1;
            Err(std::io::Error::from(std::io::ErrorKind::NotFound))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn failed_save_keeps_the_in_memory_set_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        // A document path inside a directory that never exists: loading
        // sees a missing file (empty set), every save attempt fails.
        let path = dir.path().join("nonexistent").join("alarms.json");
        let mut store = AlarmStore::open_at(path).unwrap();
        store.create(fire_time(7, 0), "wake".into(), vec![]);

        let err = store.save().unwrap_err();
        assert!(matches!(err, StorageError::WriteFailed { .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].label, "wake");
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alarms.json");
        let mut store = AlarmStore::open_at(path.clone()).unwrap();
        store.create(fire_time(7, 0), String::new(), vec![]);
        store.save().unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
