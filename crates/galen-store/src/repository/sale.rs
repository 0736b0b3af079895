//! # Sale Repository
//!
//! The sale transaction and the sale read views.
//!
//! ## Sale Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Sale Commit Sequence                          │
//! │                                                                     │
//! │  1. PRICE (galen-core, pure)                                        │
//! │     └── line totals, total, discount bounds, final amount           │
//! │                                                                     │
//! │  2. VALIDATE (under the write lock, before any mutation)            │
//! │     └── every line's medicine exists                                │
//! │     └── every line's quantity ≤ on-hand quantity                    │
//! │                                                                     │
//! │  3. APPLY (infallible once validation passed)                       │
//! │     └── append Sale header                                          │
//! │     └── per line: append InvoiceLine                                │
//! │     └── per line: append OUT StockTransaction "Sale #<id>"          │
//! │     └── per line: decrement Medicine::quantity                      │
//! │                                                                     │
//! │  4. FLUSH one snapshot write                                        │
//! │                                                                     │
//! │  A sale either fully applies or returns an error with no state      │
//! │  change; there is no partially recorded invoice.                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use galen_core::pricing::{price_sale, SaleLine};
use galen_core::{
    CoreError, InvoiceLine, Money, PaymentMethod, Sale, StockDirection, StockTransaction,
};

use crate::error::{StoreError, StoreResult};
use crate::repository::UNKNOWN_NAME;
use crate::snapshot::next_id;
use crate::store::Store;

// =============================================================================
// Request / View Types
// =============================================================================

/// A sale request as submitted by the cashier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    #[serde(default)]
    pub customer_id: Option<u64>,
    pub items: Vec<SaleLine>,
    #[serde(default)]
    pub discount_cents: Option<Money>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub created_by: Option<u64>,
}

/// A sale joined with customer and cashier names for list views.
#[derive(Debug, Clone, Serialize)]
pub struct SaleSummary {
    #[serde(flatten)]
    pub sale: Sale,
    /// `None` when the sale was anonymous or the customer was deleted.
    pub customer_name: Option<String>,
    /// `None` when the recording user is unknown or was deleted.
    pub created_by_name: Option<String>,
}

/// One invoice line joined with its medicine's name.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLineDetail {
    #[serde(flatten)]
    pub line: InvoiceLine,
    /// "Unknown" when the medicine was deleted.
    pub medicine_name: String,
}

/// Full sale detail: header, customer contact, invoice lines.
#[derive(Debug, Clone, Serialize)]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub items: Vec<InvoiceLineDetail>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale operations.
#[derive(Clone)]
pub struct SaleRepository {
    store: Store,
}

impl SaleRepository {
    pub(crate) fn new(store: Store) -> Self {
        SaleRepository { store }
    }

    /// Records a sale: header, invoice lines, OUT stock transactions, and
    /// quantity decrements, flushed in one snapshot write.
    pub fn create(&self, new: NewSale) -> StoreResult<Sale> {
        // Pure pricing first; rejects empty sales, bad quantities,
        // negative prices and out-of-bounds discounts.
        let discount = new.discount_cents.unwrap_or_else(Money::zero);
        let totals = price_sale(&new.items, discount).map_err(StoreError::Core)?;

        self.store.commit(|snapshot| {
            // Validate every line against live stock before touching
            // anything. Requested quantities are summed per medicine so
            // two lines for the same medicine cannot slip past the check.
            let mut requested: HashMap<u64, i64> = HashMap::new();
            for line in &new.items {
                *requested.entry(line.medicine_id).or_default() += line.quantity;
            }

            for (&medicine_id, &quantity) in &requested {
                let medicine = snapshot
                    .collections
                    .medicines
                    .iter()
                    .find(|m| m.id == medicine_id)
                    .ok_or(StoreError::Core(CoreError::MedicineNotFound(medicine_id)))?;

                if medicine.quantity < quantity {
                    return Err(StoreError::Core(CoreError::InsufficientStock {
                        name: medicine.name.clone(),
                        available: medicine.quantity,
                        requested: quantity,
                    }));
                }
            }

            // Validation passed: apply.
            let now = Utc::now();
            let sale = Sale {
                id: next_id(&mut snapshot.counters.sales),
                customer_id: new.customer_id,
                total_cents: totals.total_cents,
                discount_cents: totals.discount_cents,
                final_cents: totals.final_cents,
                payment_method: new.payment_method,
                created_by: new.created_by,
                created_at: now,
            };

            debug!(id = sale.id, lines = new.items.len(), "Recording sale");

            for line in &new.items {
                snapshot.collections.invoices.push(InvoiceLine {
                    id: next_id(&mut snapshot.counters.invoices),
                    sale_id: sale.id,
                    medicine_id: line.medicine_id,
                    quantity: line.quantity,
                    unit_price_cents: line.unit_price_cents,
                    line_total_cents: line.line_total(),
                });

                snapshot.collections.stock.push(StockTransaction {
                    id: next_id(&mut snapshot.counters.stock),
                    medicine_id: line.medicine_id,
                    quantity: line.quantity,
                    direction: StockDirection::Out,
                    reference: format!("Sale #{}", sale.id),
                    created_at: now,
                });

                if let Some(medicine) = snapshot
                    .collections
                    .medicines
                    .iter_mut()
                    .find(|m| m.id == line.medicine_id)
                {
                    medicine.quantity -= line.quantity;
                    medicine.updated_at = now;
                }
            }

            snapshot.collections.sales.push(sale.clone());

            info!(
                id = sale.id,
                total_cents = sale.total_cents.cents(),
                final_cents = sale.final_cents.cents(),
                "Sale committed"
            );

            Ok(sale)
        })
    }

    /// Lists all sales joined with customer and cashier names.
    pub fn list(&self) -> Vec<SaleSummary> {
        let snapshot = self.store.read();

        snapshot
            .collections
            .sales
            .iter()
            .map(|sale| {
                let customer_name = sale.customer_id.and_then(|cid| {
                    snapshot
                        .collections
                        .customers
                        .iter()
                        .find(|c| c.id == cid)
                        .map(|c| c.name.clone())
                });
                let created_by_name = sale.created_by.and_then(|uid| {
                    snapshot
                        .collections
                        .users
                        .iter()
                        .find(|u| u.id == uid)
                        .map(|u| u.username.clone())
                });
                SaleSummary {
                    sale: sale.clone(),
                    customer_name,
                    created_by_name,
                }
            })
            .collect()
    }

    /// Gets one sale with its invoice lines and resolved names.
    pub fn get(&self, id: u64) -> StoreResult<SaleDetail> {
        let snapshot = self.store.read();

        let sale = snapshot
            .collections
            .sales
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Sale", id))?;

        let customer = sale
            .customer_id
            .and_then(|cid| snapshot.collections.customers.iter().find(|c| c.id == cid));

        let items = snapshot
            .collections
            .invoices
            .iter()
            .filter(|line| line.sale_id == id)
            .map(|line| {
                let medicine_name = snapshot
                    .collections
                    .medicines
                    .iter()
                    .find(|m| m.id == line.medicine_id)
                    .map_or_else(|| UNKNOWN_NAME.to_string(), |m| m.name.clone());
                InvoiceLineDetail {
                    line: line.clone(),
                    medicine_name,
                }
            })
            .collect();

        Ok(SaleDetail {
            customer_name: customer.map(|c| c.name.clone()),
            customer_phone: customer.map(|c| c.phone.clone()),
            sale,
            items,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
