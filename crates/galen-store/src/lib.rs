//! # galen-store: Ledger Store for Galen POS
//!
//! This crate holds every entity collection in memory and persists the
//! whole ledger as a single JSON snapshot file after each mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Galen POS Data Flow                           │
//! │                                                                     │
//! │  HTTP handler (POST /api/sales)                                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                   galen-store (THIS CRATE)                  │   │
//! │  │                                                             │   │
//! │  │   ┌──────────────┐   ┌───────────────┐   ┌──────────────┐  │   │
//! │  │   │    Store     │   │ Repositories  │   │   Snapshot   │  │   │
//! │  │   │  (store.rs)  │   │ (medicine.rs) │   │ (snapshot.rs)│  │   │
//! │  │   │              │   │               │   │              │  │   │
//! │  │   │ RwLock over  │◄──│ MedicineRepo  │   │ Collections  │  │   │
//! │  │   │ the snapshot │   │ SaleRepo ...  │   │ + Counters   │  │   │
//! │  │   └──────────────┘   └───────────────┘   └──────────────┘  │   │
//! │  │                                                             │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ledger.json (full snapshot, rewritten on every mutation)           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store` facade and locking/commit discipline
//! - [`snapshot`] - Snapshot document, load/save, counters
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations (medicine, sale, etc.)
//!
//! ## Usage
//!
//! ```rust
//! use galen_store::Store;
//!
//! let store = Store::in_memory();
//! let medicines = store.medicines().list();
//! assert!(medicines.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod snapshot;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use snapshot::Snapshot;
pub use store::Store;

// Repository re-exports for convenience
pub use repository::customer::{CustomerRepository, CustomerSaleHistory, CustomerUpdate, NewCustomer};
pub use repository::medicine::{MedicineRepository, MedicineUpdate, MedicineWithSupplier, NewMedicine};
pub use repository::report::{DashboardStats, ReportRepository};
pub use repository::sale::{NewSale, SaleDetail, SaleRepository, SaleSummary};
pub use repository::stock::{StockReceipt, StockRepository, StockWithMedicine};
pub use repository::supplier::{NewSupplier, SupplierRepository, SupplierUpdate};
pub use repository::user::{NewUser, UserRepository};
