//! # Report Repository
//!
//! Read-only aggregates over the snapshot: the dashboard card counts,
//! date-ranged sales, and the expiry watchlist.

use chrono::NaiveDate;
use serde::Serialize;

use galen_core::{Medicine, Money, Sale};

use crate::store::Store;

/// Counts and totals for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_medicines: usize,
    /// Medicines with quantity strictly below the low-stock threshold.
    pub low_stock: usize,
    /// Medicines whose expiry date is before `today`.
    pub expired: usize,
    /// Revenue (final amounts) of sales recorded today.
    pub today_sales_cents: Money,
}

/// Repository for reporting queries.
#[derive(Clone)]
pub struct ReportRepository {
    store: Store,
}

impl ReportRepository {
    pub(crate) fn new(store: Store) -> Self {
        ReportRepository { store }
    }

    /// Computes the dashboard counters for the given day.
    pub fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        let snapshot = self.store.read();
        let medicines = &snapshot.collections.medicines;

        DashboardStats {
            total_medicines: medicines.len(),
            low_stock: medicines.iter().filter(|m| m.is_low_stock()).count(),
            expired: medicines.iter().filter(|m| m.is_expired(today)).count(),
            today_sales_cents: snapshot
                .collections
                .sales
                .iter()
                .filter(|s| s.created_on(today))
                .map(|s| s.final_cents)
                .sum(),
        }
    }

    /// Sales within the given inclusive date bounds. Either bound may be
    /// omitted to leave that side open.
    pub fn sales_between(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<Sale> {
        self.store
            .read()
            .collections
            .sales
            .iter()
            .filter(|sale| {
                let day = sale.created_at.date_naive();
                start.map_or(true, |s| day >= s) && end.map_or(true, |e| day <= e)
            })
            .cloned()
            .collect()
    }

    /// Medicines that expire within the watch window after `today`
    /// (already-expired stock is excluded; it shows on the dashboard).
    pub fn expiring(&self, today: NaiveDate) -> Vec<Medicine> {
        self.store
            .read()
            .collections
            .medicines
            .iter()
            .filter(|m| m.expires_soon(today))
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
