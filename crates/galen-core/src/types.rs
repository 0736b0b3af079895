//! # Domain Types
//!
//! Core domain types used throughout Galen POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌─────────────────────┐ │
//! │  │    Medicine    │   │      Sale      │   │  StockTransaction   │ │
//! │  │  ────────────  │   │  ────────────  │   │  ─────────────────  │ │
//! │  │  id (u64)      │   │  id (u64)      │   │  id (u64)           │ │
//! │  │  name          │   │  customer_id?  │   │  medicine_id        │ │
//! │  │  price_cents   │   │  total_cents   │   │  direction IN/OUT   │ │
//! │  │  quantity      │   │  final_cents   │   │  quantity (delta)   │ │
//! │  │  expiry_date   │   │  + lines       │   │  reference          │ │
//! │  └────────────────┘   └────────────────┘   └─────────────────────┘ │
//! │                                                                     │
//! │  Customer / Supplier: flat contact records                          │
//! │  User: username + argon2 hash + role                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity carries a `u64` id assigned from a per-collection
//! auto-increment counter that is persisted alongside the collections.
//!
//! The stock transaction log is an append-only audit trail. It is never
//! reconciled against `Medicine::quantity`, which remains the live value.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::{EXPIRY_WINDOW_DAYS, LOW_STOCK_THRESHOLD};

// =============================================================================
// Medicine
// =============================================================================

/// A medicine available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    /// Unique identifier (auto-increment).
    pub id: u64,

    /// Display name shown in listings and on invoices.
    pub name: String,

    /// Category label (Tablet, Syrup, Capsule, ...). Free text.
    pub category: String,

    /// Unit price in cents.
    pub price_cents: Money,

    /// On-hand quantity. Mutated by stock receipts and sales.
    pub quantity: i64,

    /// Expiry date of the current batch.
    pub expiry_date: NaiveDate,

    /// Supplying vendor, if known. Dangling references are legal and are
    /// resolved to `null` at read time.
    pub supplier_id: Option<u64>,

    /// Batch number of the current stock.
    pub batch_no: String,

    /// When the medicine was created.
    pub created_at: DateTime<Utc>,

    /// When the medicine was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Whether on-hand quantity is below the fixed low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    /// Whether the medicine is already expired as of `today`.
    #[inline]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }

    /// Whether the medicine expires within the report window: strictly
    /// after `today` and no later than `today + EXPIRY_WINDOW_DAYS`.
    pub fn expires_soon(&self, today: NaiveDate) -> bool {
        let window_end = today + chrono::Duration::days(EXPIRY_WINDOW_DAYS);
        self.expiry_date > today && self.expiry_date <= window_end
    }
}

// =============================================================================
// Stock Transaction
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockDirection {
    /// Stock received (initial stock, purchase, correction).
    #[serde(rename = "IN")]
    In,
    /// Stock sold.
    #[serde(rename = "OUT")]
    Out,
}

/// An audit-log entry recording a quantity change against a medicine.
///
/// Append-only. The `quantity` field is the magnitude of the movement; the
/// sign lives in `direction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: u64,
    pub medicine_id: u64,
    /// Magnitude of the movement (always positive).
    pub quantity: i64,
    pub direction: StockDirection,
    /// Free-text reference, e.g. `Initial Stock` or `Sale #12`.
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Customer / Supplier
// =============================================================================

/// A customer contact record.
///
/// No referential integrity is enforced against sales: deleting a customer
/// leaves their past sales with a dangling `customer_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A supplier contact record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: u64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Mobile wallet payment.
    Mobile,
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale transaction (header record).
///
/// Line items live in [`InvoiceLine`] records keyed by `sale_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: u64,
    /// Customer the sale was made to, if recorded.
    pub customer_id: Option<u64>,
    /// Sum of line totals before discount.
    pub total_cents: Money,
    /// Whole-sale discount.
    pub discount_cents: Money,
    /// `total_cents - discount_cents`.
    pub final_cents: Money,
    pub payment_method: PaymentMethod,
    /// User who recorded the sale.
    pub created_by: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Whether the sale was created on the given UTC calendar day.
    pub fn created_on(&self, day: NaiveDate) -> bool {
        let d = self.created_at.date_naive();
        d.year() == day.year() && d.ordinal() == day.ordinal()
    }
}

/// A line item on a sale invoice.
///
/// The unit price is frozen at sale time; later medicine price changes do
/// not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: u64,
    pub sale_id: u64,
    pub medicine_id: u64,
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: Money,
    /// `quantity × unit_price_cents`.
    pub line_total_cents: Money,
}

// =============================================================================
// User
// =============================================================================

/// User role. Stored and serialized with the original capitalized labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Staff,
    Customer,
    Pharmacist,
}

impl Default for Role {
    fn default() -> Self {
        Role::Staff
    }
}

/// A user account.
///
/// `password_hash` is an argon2 PHC string; the plaintext never leaves the
/// login/register handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(quantity: i64, expiry: NaiveDate) -> Medicine {
        Medicine {
            id: 1,
            name: "Amoxicillin 250mg".to_string(),
            category: "Capsule".to_string(),
            price_cents: Money::from_cents(850),
            quantity,
            expiry_date: expiry,
            supplier_id: None,
            batch_no: "B-104".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_low_stock_threshold_is_strict() {
        assert!(medicine(9, date(2030, 1, 1)).is_low_stock());
        assert!(!medicine(10, date(2030, 1, 1)).is_low_stock());
    }

    #[test]
    fn test_expiry_banding() {
        let today = date(2026, 8, 30);

        // Already expired: before today.
        assert!(medicine(5, date(2026, 8, 29)).is_expired(today));
        assert!(!medicine(5, date(2026, 8, 30)).is_expired(today));

        // Expiring soon: strictly after today, within 30 days.
        assert!(!medicine(5, date(2026, 8, 30)).expires_soon(today));
        assert!(medicine(5, date(2026, 9, 1)).expires_soon(today));
        assert!(medicine(5, date(2026, 9, 29)).expires_soon(today));
        assert!(!medicine(5, date(2026, 9, 30)).expires_soon(today));
    }

    #[test]
    fn test_stock_direction_wire_format() {
        assert_eq!(
            serde_json::to_string(&StockDirection::In).unwrap(),
            "\"IN\""
        );
        assert_eq!(
            serde_json::to_string(&StockDirection::Out).unwrap(),
            "\"OUT\""
        );
    }

    #[test]
    fn test_role_default_is_staff() {
        assert_eq!(Role::default(), Role::Staff);
    }

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"cash\""
        );
    }

    #[test]
    fn test_sale_created_on() {
        let sale = Sale {
            id: 1,
            customer_id: None,
            total_cents: Money::from_cents(100),
            discount_cents: Money::zero(),
            final_cents: Money::from_cents(100),
            payment_method: PaymentMethod::Cash,
            created_by: None,
            created_at: "2026-08-30T09:15:00Z".parse().unwrap(),
        };
        assert!(sale.created_on(date(2026, 8, 30)));
        assert!(!sale.created_on(date(2026, 8, 31)));
    }
}
