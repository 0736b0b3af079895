//! # Store Facade
//!
//! [`Store`] owns the in-memory snapshot and hands out repositories.
//!
//! ## Concurrency Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Single-Writer Snapshot Store                    │
//! │                                                                     │
//! │  HTTP handler ──► repository ──► Store                              │
//! │                                    │                                │
//! │                         ┌──────────┴──────────┐                     │
//! │                         │  RwLock<Snapshot>   │                     │
//! │                         └──────────┬──────────┘                     │
//! │       reads: shared lock, scan     │  writes: exclusive lock,       │
//! │                                    │  mutate, then save file        │
//! │                                    ▼                                │
//! │                          ledger.json (whole-file swap)              │
//! │                                                                     │
//! │  One process, one writer at a time. Mutations hold the write lock   │
//! │  across both the in-memory change and the snapshot write, so a      │
//! │  reader can never observe a half-applied sale. Multiple processes   │
//! │  sharing one file remain unguarded (out of scope).                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use crate::error::StoreResult;
use crate::repository::customer::CustomerRepository;
use crate::repository::medicine::MedicineRepository;
use crate::repository::report::ReportRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::stock::StockRepository;
use crate::repository::supplier::SupplierRepository;
use crate::repository::user::UserRepository;
use crate::snapshot::Snapshot;

struct StoreInner {
    snapshot: RwLock<Snapshot>,
    /// Backing file. `None` means in-memory mode: mutations skip the save.
    path: Option<PathBuf>,
}

/// Handle to the ledger store. Cheap to clone (shared `Arc`).
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Opens a store backed by the snapshot file at `path`.
    ///
    /// A missing file starts an empty ledger; a corrupt file is an error.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Store> {
        let path = path.into();
        let snapshot = Snapshot::load(&path)?;

        info!(path = %path.display(), "Store opened");

        Ok(Store {
            inner: Arc::new(StoreInner {
                snapshot: RwLock::new(snapshot),
                path: Some(path),
            }),
        })
    }

    /// Opens an in-memory store with no backing file.
    ///
    /// Used by tests and by deployments that accept losing state on exit
    /// (the browser-localStorage mode of the original system).
    pub fn in_memory() -> Store {
        Store {
            inner: Arc::new(StoreInner {
                snapshot: RwLock::new(Snapshot::default()),
                path: None,
            }),
        }
    }

    // =========================================================================
    // Repository Accessors
    // =========================================================================

    pub fn medicines(&self) -> MedicineRepository {
        MedicineRepository::new(self.clone())
    }

    pub fn stock(&self) -> StockRepository {
        StockRepository::new(self.clone())
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.clone())
    }

    pub fn suppliers(&self) -> SupplierRepository {
        SupplierRepository::new(self.clone())
    }

    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.clone())
    }

    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.clone())
    }

    // =========================================================================
    // Locking
    // =========================================================================
    // Lock poisoning is ignored: a panic mid-read leaves the snapshot
    // untouched, and mutations only flip in-memory state after validation.

    /// Takes the shared lock for a read-only scan.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.inner
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs a mutation under the exclusive lock, then persists the snapshot.
    ///
    /// ## Contract
    /// The closure must validate BEFORE mutating: an `Err` return is
    /// expected to leave the snapshot exactly as it found it. On success
    /// the whole snapshot is written out in one flush.
    pub(crate) fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut Snapshot) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut guard: RwLockWriteGuard<'_, Snapshot> = self
            .inner
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let result = mutate(&mut guard)?;

        if let Some(path) = &self.inner.path {
            guard.save(path)?;
        }

        Ok(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn test_in_memory_store_starts_empty() {
        let store = Store::in_memory();
        assert!(store.read().collections.medicines.is_empty());
    }

    #[test]
    fn test_commit_persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let store = Store::open(&path).unwrap();
        store
            .commit(|snapshot| {
                snapshot.counters.medicines = 42;
                Ok(())
            })
            .unwrap();

        // A fresh handle sees the committed state.
        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.read().counters.medicines, 42);
    }

    #[test]
    fn test_failed_commit_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let store = Store::open(&path).unwrap();
        let result: StoreResult<()> =
            store.commit(|_| Err(StoreError::not_found("Medicine", 99)));
        assert!(result.is_err());

        // No snapshot file was created by the failed mutation.
        assert!(!path.exists());
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::in_memory();
        let clone = store.clone();

        store
            .commit(|snapshot| {
                snapshot.counters.sales = 7;
                Ok(())
            })
            .unwrap();

        assert_eq!(clone.read().counters.sales, 7);
    }
}
