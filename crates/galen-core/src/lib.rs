//! # galen-core: Pure Business Logic for Galen POS
//!
//! This crate is the **heart** of Galen POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Galen POS Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  HTTP Handlers (axum)                       │   │
//! │  │   /api/medicines  /api/sales  /api/stock  /api/reports      │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ galen-core (THIS CRATE) ★                   │   │
//! │  │                                                             │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌─────────┐ │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │validation│ │   │
//! │  │   │ Medicine  │  │   Money   │  │ SaleDraft │  │  rules  │ │   │
//! │  │   │   Sale    │  │  (cents)  │  │  totals   │  │  checks │ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────────┘ │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO SNAPSHOT FILE • NO NETWORK • PURE FUNCTIONS   │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               galen-store (Ledger Store)                    │   │
//! │  │       In-memory collections + JSON snapshot file            │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, Sale, StockTransaction, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Sale total / discount computation
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Snapshot file, network, clock-free where practical
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use galen_core::Money` instead of
// `use galen_core::money::Money`.

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// A medicine with on-hand quantity strictly below this is "low stock".
///
/// The low-stock report and the dashboard low-stock counter both use this
/// fixed threshold.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Expiry report window: medicines expiring within this many days.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

/// Maximum quantity of a single medicine on one invoice line.
///
/// ## Business Reason
/// Prevents accidental over-selling (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
