//! # Sale Pricing
//!
//! Pure computation of invoice line totals and sale totals.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Sale Pricing Flow                            │
//! │                                                                     │
//! │  POST /api/sales { items, discount_cents }                          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  price_sale(lines, discount)  ← THIS MODULE                         │
//! │       │                                                             │
//! │       ├── per line: line_total = quantity × unit_price             │
//! │       ├── total  = Σ line_total                                     │
//! │       ├── final  = total − discount                                 │
//! │       │                                                             │
//! │       └── SaleTotals { total, discount, final }                     │
//! │                                                                     │
//! │  The store then writes header + lines + OUT stock transactions.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are always computed server-side from the submitted lines; a
//! client-supplied total is never trusted.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_quantity, validate_unit_price};

// =============================================================================
// Input / Output Types
// =============================================================================

/// One requested invoice line: which medicine, how many, at what price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    pub medicine_id: u64,
    pub quantity: i64,
    pub unit_price_cents: Money,
}

impl SaleLine {
    /// Line total: `quantity × unit_price`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price_cents.times(self.quantity)
    }
}

/// Computed sale amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleTotals {
    pub total_cents: Money,
    pub discount_cents: Money,
    pub final_cents: Money,
}

// =============================================================================
// Pricing
// =============================================================================

/// Prices a sale request.
///
/// ## Rules
/// - At least one line (an empty sale is rejected)
/// - Every quantity positive and within [`crate::MAX_LINE_QUANTITY`]
/// - Every unit price non-negative
/// - `0 <= discount <= total`
///
/// ## Returns
/// The computed totals. Stock levels are NOT consulted here; that check
/// belongs to the store, which knows the live quantities.
pub fn price_sale(lines: &[SaleLine], discount_cents: Money) -> CoreResult<SaleTotals> {
    if lines.is_empty() {
        return Err(CoreError::EmptySale);
    }

    for line in lines {
        validate_quantity(line.quantity)?;
        validate_unit_price(line.unit_price_cents)?;
    }

    let total_cents: Money = lines.iter().map(SaleLine::line_total).sum();

    if discount_cents.is_negative() || discount_cents > total_cents {
        return Err(CoreError::InvalidDiscount {
            discount_cents: discount_cents.cents(),
            total_cents: total_cents.cents(),
        });
    }

    Ok(SaleTotals {
        total_cents,
        discount_cents,
        final_cents: total_cents.saturating_sub(discount_cents),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i64, unit_cents: i64) -> SaleLine {
        SaleLine {
            medicine_id: 1,
            quantity,
            unit_price_cents: Money::from_cents(unit_cents),
        }
    }

    #[test]
    fn test_single_line_contributes_q_times_p() {
        let totals = price_sale(&[line(3, 450)], Money::zero()).unwrap();
        assert_eq!(totals.total_cents.cents(), 1350);
        assert_eq!(totals.final_cents.cents(), 1350);
    }

    #[test]
    fn test_multiple_lines_sum() {
        let totals = price_sale(&[line(2, 500), line(1, 1250)], Money::zero()).unwrap();
        assert_eq!(totals.total_cents.cents(), 2250);
    }

    #[test]
    fn test_discount_applied_to_final() {
        let totals = price_sale(&[line(2, 1000)], Money::from_cents(300)).unwrap();
        assert_eq!(totals.total_cents.cents(), 2000);
        assert_eq!(totals.discount_cents.cents(), 300);
        assert_eq!(totals.final_cents.cents(), 1700);
    }

    #[test]
    fn test_discount_may_equal_total() {
        let totals = price_sale(&[line(1, 500)], Money::from_cents(500)).unwrap();
        assert_eq!(totals.final_cents.cents(), 0);
    }

    #[test]
    fn test_discount_above_total_rejected() {
        let err = price_sale(&[line(1, 500)], Money::from_cents(501)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDiscount { .. }));
    }

    #[test]
    fn test_negative_discount_rejected() {
        let err = price_sale(&[line(1, 500)], Money::from_cents(-1)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDiscount { .. }));
    }

    #[test]
    fn test_empty_sale_rejected() {
        assert!(matches!(
            price_sale(&[], Money::zero()).unwrap_err(),
            CoreError::EmptySale
        ));
    }

    #[test]
    fn test_bad_quantity_rejected() {
        assert!(price_sale(&[line(0, 500)], Money::zero()).is_err());
        assert!(price_sale(&[line(-2, 500)], Money::zero()).is_err());
        assert!(price_sale(&[line(1000, 500)], Money::zero()).is_err());
    }

    #[test]
    fn test_negative_unit_price_rejected() {
        assert!(price_sale(&[line(1, -500)], Money::zero()).is_err());
    }
}
