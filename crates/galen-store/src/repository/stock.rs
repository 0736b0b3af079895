//! # Stock Repository
//!
//! The stock ledger: read-side join with medicine names, plus receipts.
//!
//! ## Stock Movements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Stock Movement Sources                        │
//! │                                                                     │
//! │  Medicine created  ──► IN  "Initial Stock"   (medicine.rs)          │
//! │  Stock received    ──► IN  free-text ref     (THIS FILE)            │
//! │  Sale committed    ──► OUT "Sale #<id>"      (sale.rs)              │
//! │                                                                     │
//! │  The ledger is append-only. It is an audit trail beside the live    │
//! │  Medicine::quantity field, never reconciled against it.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use galen_core::validation::validate_quantity;
use galen_core::{StockDirection, StockTransaction};

use crate::error::{StoreError, StoreResult};
use crate::repository::UNKNOWN_NAME;
use crate::snapshot::next_id;
use crate::store::Store;

/// Fields accepted when receiving stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockReceipt {
    pub medicine_id: u64,
    pub quantity: i64,
    #[serde(default)]
    pub reference: Option<String>,
}

/// A stock transaction joined with its medicine's name.
#[derive(Debug, Clone, Serialize)]
pub struct StockWithMedicine {
    #[serde(flatten)]
    pub transaction: StockTransaction,
    /// "Unknown" when the medicine was deleted.
    pub medicine_name: String,
}

/// Repository for the stock ledger.
#[derive(Clone)]
pub struct StockRepository {
    store: Store,
}

impl StockRepository {
    pub(crate) fn new(store: Store) -> Self {
        StockRepository { store }
    }

    /// Lists the full stock ledger joined with medicine names.
    pub fn list(&self) -> Vec<StockWithMedicine> {
        let snapshot = self.store.read();

        snapshot
            .collections
            .stock
            .iter()
            .map(|transaction| {
                let medicine_name = snapshot
                    .collections
                    .medicines
                    .iter()
                    .find(|m| m.id == transaction.medicine_id)
                    .map_or_else(|| UNKNOWN_NAME.to_string(), |m| m.name.clone());
                StockWithMedicine {
                    transaction: transaction.clone(),
                    medicine_name,
                }
            })
            .collect()
    }

    /// Receives stock: appends an `IN` transaction and increments the
    /// medicine's on-hand quantity.
    ///
    /// An unknown medicine id is an error; nothing is written.
    pub fn receive(&self, receipt: StockReceipt) -> StoreResult<StockTransaction> {
        validate_quantity(receipt.quantity).map_err(galen_core::CoreError::from)?;

        self.store.commit(|snapshot| {
            let medicine = snapshot
                .collections
                .medicines
                .iter_mut()
                .find(|m| m.id == receipt.medicine_id)
                .ok_or_else(|| StoreError::not_found("Medicine", receipt.medicine_id))?;

            medicine.quantity += receipt.quantity;
            medicine.updated_at = Utc::now();

            let transaction = StockTransaction {
                id: next_id(&mut snapshot.counters.stock),
                medicine_id: receipt.medicine_id,
                quantity: receipt.quantity,
                direction: StockDirection::In,
                reference: receipt
                    .reference
                    .unwrap_or_else(|| "Stock Received".to_string()),
                created_at: Utc::now(),
            };

            debug!(
                medicine_id = receipt.medicine_id,
                quantity = receipt.quantity,
                "Stock received"
            );

            snapshot.collections.stock.push(transaction.clone());
            Ok(transaction)
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::medicine::NewMedicine;
    use galen_core::Money;

    fn seeded_store() -> (Store, u64) {
        let store = Store::in_memory();
        let medicine = store
            .medicines()
            .create(NewMedicine {
                name: "Amoxicillin".to_string(),
                category: "Capsule".to_string(),
                price_cents: Money::from_cents(850),
                quantity: 10,
                expiry_date: "2027-06-01".parse().unwrap(),
                supplier_id: None,
                batch_no: None,
            })
            .unwrap();
        (store, medicine.id)
    }

    #[test]
    fn test_receive_increments_quantity_and_appends_in() {
        let (store, medicine_id) = seeded_store();

        let transaction = store
            .stock()
            .receive(StockReceipt {
                medicine_id,
                quantity: 15,
                reference: Some("PO-2041".to_string()),
            })
            .unwrap();

        assert_eq!(transaction.direction, StockDirection::In);
        assert_eq!(transaction.reference, "PO-2041");
        assert_eq!(store.medicines().get(medicine_id).unwrap().quantity, 25);

        // Initial stock entry + this receipt.
        assert_eq!(store.stock().list().len(), 2);
    }

    #[test]
    fn test_receive_unknown_medicine_is_not_found() {
        let (store, _) = seeded_store();

        let err = store
            .stock()
            .receive(StockReceipt {
                medicine_id: 99,
                quantity: 5,
                reference: None,
            })
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
        // Nothing was appended to the ledger.
        assert_eq!(store.stock().list().len(), 1);
    }

    #[test]
    fn test_receive_rejects_non_positive_quantity() {
        let (store, medicine_id) = seeded_store();

        for quantity in [0, -5] {
            let err = store
                .stock()
                .receive(StockReceipt {
                    medicine_id,
                    quantity,
                    reference: None,
                })
                .unwrap_err();
            assert!(matches!(err, StoreError::Core(_)));
        }
    }

    #[test]
    fn test_receive_default_reference() {
        let (store, medicine_id) = seeded_store();

        let transaction = store
            .stock()
            .receive(StockReceipt {
                medicine_id,
                quantity: 1,
                reference: None,
            })
            .unwrap();

        assert_eq!(transaction.reference, "Stock Received");
    }
}
