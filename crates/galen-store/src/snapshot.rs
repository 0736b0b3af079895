//! # Snapshot Module
//!
//! The on-disk representation of the whole ledger: every collection plus
//! the auto-increment counter map, serialized as one JSON document.
//!
//! ## Snapshot Persistence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Snapshot Lifecycle                             │
//! │                                                                     │
//! │  OPEN                                                               │
//! │    file exists   → parse JSON → Snapshot                            │
//! │    file missing  → Snapshot::default() (empty, counters at 1)       │
//! │    file corrupt  → StoreError::Corrupt (never silently reset)       │
//! │                                                                     │
//! │  EVERY MUTATION                                                     │
//! │    serialize whole snapshot (pretty JSON)                           │
//! │        │                                                            │
//! │        ▼                                                            │
//! │    write <file>.tmp  ──rename──►  <file>                            │
//! │                                                                     │
//! │  The rename swap means a crash mid-write leaves the previous        │
//! │  snapshot intact; there is no incremental or append-only log.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use galen_core::{Customer, InvoiceLine, Medicine, Sale, StockTransaction, Supplier, User};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Counters
// =============================================================================

/// Per-collection auto-increment counters.
///
/// Each counter holds the NEXT id to assign. Persisted with the snapshot so
/// ids are never reused after a restart, even when rows were deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counters {
    pub users: u64,
    pub medicines: u64,
    pub stock: u64,
    pub customers: u64,
    pub suppliers: u64,
    pub sales: u64,
    pub invoices: u64,
}

impl Default for Counters {
    fn default() -> Self {
        Counters {
            users: 1,
            medicines: 1,
            stock: 1,
            customers: 1,
            suppliers: 1,
            sales: 1,
            invoices: 1,
        }
    }
}

/// Takes the next id from a counter and advances it.
pub fn next_id(counter: &mut u64) -> u64 {
    let id = *counter;
    *counter += 1;
    id
}

// =============================================================================
// Collections
// =============================================================================

/// All entity collections, in insertion order.
///
/// Plain vectors scanned linearly: at this data scale an index would buy
/// nothing, and the vectors serialize directly into the snapshot document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub medicines: Vec<Medicine>,
    #[serde(default)]
    pub stock: Vec<StockTransaction>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub invoices: Vec<InvoiceLine>,
}

// =============================================================================
// Snapshot
// =============================================================================

/// The whole ledger: collections plus counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub collections: Collections,
    #[serde(default)]
    pub counters: Counters,
}

impl Snapshot {
    /// Loads a snapshot from `path`.
    ///
    /// A missing file yields an empty snapshot; a present-but-unparseable
    /// file is an error.
    pub fn load(path: &Path) -> StoreResult<Snapshot> {
        if !path.exists() {
            info!(path = %path.display(), "No snapshot file, starting empty");
            return Ok(Snapshot::default());
        }

        let data = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&data).map_err(StoreError::Corrupt)?;

        info!(
            path = %path.display(),
            medicines = snapshot.collections.medicines.len(),
            sales = snapshot.collections.sales.len(),
            users = snapshot.collections.users.len(),
            "Snapshot loaded"
        );

        Ok(snapshot)
    }

    /// Writes the whole snapshot to `path` via a temp-file-then-rename swap.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let data = serde_json::to_vec_pretty(self)?;

        let tmp = tmp_path(path);
        fs::write(&tmp, &data)?;
        fs::rename(&tmp, path)?;

        debug!(path = %path.display(), bytes = data.len(), "Snapshot written");
        Ok(())
    }
}

/// Sibling temp path for the atomic swap (`ledger.json` -> `ledger.json.tmp`).
fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use galen_core::{Money, Role};

    #[test]
    fn test_default_counters_start_at_one() {
        let counters = Counters::default();
        assert_eq!(counters.medicines, 1);
        assert_eq!(counters.sales, 1);
    }

    #[test]
    fn test_next_id_advances() {
        let mut counter = 1;
        assert_eq!(next_id(&mut counter), 1);
        assert_eq!(next_id(&mut counter), 2);
        assert_eq!(counter, 3);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::load(&dir.path().join("missing.json")).unwrap();
        assert!(snapshot.collections.medicines.is_empty());
        assert_eq!(snapshot.counters.medicines, 1);
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Snapshot::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn test_save_load_roundtrip_preserves_collections_and_counters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let mut snapshot = Snapshot::default();
        snapshot.collections.users.push(User {
            id: next_id(&mut snapshot.counters.users),
            username: "admin".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::Admin,
            email: Some("admin@pharmacy.example".to_string()),
            created_at: Utc::now(),
        });
        snapshot.collections.medicines.push(Medicine {
            id: next_id(&mut snapshot.counters.medicines),
            name: "Cetirizine 10mg".to_string(),
            category: "Tablet".to_string(),
            price_cents: Money::from_cents(320),
            quantity: 40,
            expiry_date: "2027-05-01".parse().unwrap(),
            supplier_id: None,
            batch_no: "B-77".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        snapshot.save(&path).unwrap();

        let reloaded = Snapshot::load(&path).unwrap();
        assert_eq!(reloaded.collections.users.len(), 1);
        assert_eq!(reloaded.collections.medicines.len(), 1);
        assert_eq!(reloaded.collections.medicines[0].name, "Cetirizine 10mg");
        assert_eq!(reloaded.counters.users, 2);
        assert_eq!(reloaded.counters.medicines, 2);
        assert_eq!(reloaded.counters.sales, 1);
    }

    #[test]
    fn test_save_leaves_no_tmp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        Snapshot::default().save(&path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path(&path).exists());
    }
}
