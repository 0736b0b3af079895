//! # Repository Module
//!
//! Repository implementations for Galen POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Repository Pattern Explained                      │
//! │                                                                     │
//! │  The Repository pattern puts all collection access behind a clean   │
//! │  per-entity API.                                                    │
//! │                                                                     │
//! │  HTTP handler                                                       │
//! │       │                                                             │
//! │       │  store.medicines().create(new_medicine)                     │
//! │       ▼                                                             │
//! │  MedicineRepository                                                 │
//! │  ├── list(&self)          - joined with supplier names              │
//! │  ├── get(&self, id)                                                 │
//! │  ├── create(&self, new)   - also writes the initial IN movement     │
//! │  ├── update(&self, id, patch)                                       │
//! │  └── delete(&self, id)                                              │
//! │       │                                                             │
//! │       │  linear scan / mutate under the store lock                  │
//! │       ▼                                                             │
//! │  Snapshot collections (Vec<Medicine>, Vec<StockTransaction>, ...)   │
//! │                                                                     │
//! │  Joins are linear scans over the sibling collections, resolved at   │
//! │  read time; dangling references become null / "Unknown".            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`medicine::MedicineRepository`] - Medicine CRUD and low-stock filter
//! - [`stock::StockRepository`] - Stock ledger reads and receipts
//! - [`customer::CustomerRepository`] - Customer CRUD and sale history
//! - [`supplier::SupplierRepository`] - Supplier CRUD
//! - [`sale::SaleRepository`] - The sale transaction and sale reads
//! - [`user::UserRepository`] - User accounts
//! - [`report::ReportRepository`] - Dashboard, date-range and expiry reports

pub mod customer;
pub mod medicine;
pub mod report;
pub mod sale;
pub mod stock;
pub mod supplier;
pub mod user;

/// Fallback name used when a read-side join cannot resolve a reference.
pub(crate) const UNKNOWN_NAME: &str = "Unknown";
