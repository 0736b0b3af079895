//! # Medicine Repository
//!
//! Medicine CRUD, the supplier-name join, and the low-stock filter.
//!
//! Creating a medicine also appends the initial `IN` stock transaction, so
//! the audit trail starts at the starting quantity.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use galen_core::validation::{validate_name, validate_starting_quantity, validate_unit_price};
use galen_core::{Medicine, Money, StockDirection, StockTransaction};

use crate::error::{StoreError, StoreResult};
use crate::snapshot::next_id;
use crate::store::Store;

/// Fields accepted when creating a medicine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMedicine {
    pub name: String,
    pub category: String,
    pub price_cents: Money,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    #[serde(default)]
    pub supplier_id: Option<u64>,
    #[serde(default)]
    pub batch_no: Option<String>,
}

/// Merge-update patch: only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicineUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<Money>,
    pub quantity: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
    pub supplier_id: Option<Option<u64>>,
    pub batch_no: Option<String>,
}

/// A medicine joined with its supplier's name for list views.
#[derive(Debug, Clone, Serialize)]
pub struct MedicineWithSupplier {
    #[serde(flatten)]
    pub medicine: Medicine,
    /// `None` when the medicine has no supplier or the supplier was deleted.
    pub supplier_name: Option<String>,
}

/// Repository for medicine operations.
#[derive(Clone)]
pub struct MedicineRepository {
    store: Store,
}

impl MedicineRepository {
    pub(crate) fn new(store: Store) -> Self {
        MedicineRepository { store }
    }

    /// Lists all medicines joined with supplier names.
    pub fn list(&self) -> Vec<MedicineWithSupplier> {
        let snapshot = self.store.read();

        snapshot
            .collections
            .medicines
            .iter()
            .map(|medicine| {
                let supplier_name = medicine.supplier_id.and_then(|sid| {
                    snapshot
                        .collections
                        .suppliers
                        .iter()
                        .find(|s| s.id == sid)
                        .map(|s| s.name.clone())
                });
                MedicineWithSupplier {
                    medicine: medicine.clone(),
                    supplier_name,
                }
            })
            .collect()
    }

    /// Gets a medicine by id.
    pub fn get(&self, id: u64) -> StoreResult<Medicine> {
        self.store
            .read()
            .collections
            .medicines
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Medicine", id))
    }

    /// Creates a medicine and its initial `IN` stock transaction.
    pub fn create(&self, new: NewMedicine) -> StoreResult<Medicine> {
        let name = validate_name("name", &new.name).map_err(galen_core::CoreError::from)?;
        let category =
            validate_name("category", &new.category).map_err(galen_core::CoreError::from)?;
        validate_starting_quantity(new.quantity).map_err(galen_core::CoreError::from)?;
        validate_unit_price(new.price_cents).map_err(galen_core::CoreError::from)?;

        self.store.commit(|snapshot| {
            let now = Utc::now();
            let medicine = Medicine {
                id: next_id(&mut snapshot.counters.medicines),
                name,
                category,
                price_cents: new.price_cents,
                quantity: new.quantity,
                expiry_date: new.expiry_date,
                supplier_id: new.supplier_id,
                batch_no: new.batch_no.unwrap_or_default(),
                created_at: now,
                updated_at: now,
            };

            debug!(id = medicine.id, name = %medicine.name, "Creating medicine");

            // The audit trail opens with the starting quantity.
            snapshot.collections.stock.push(StockTransaction {
                id: next_id(&mut snapshot.counters.stock),
                medicine_id: medicine.id,
                quantity: medicine.quantity,
                direction: StockDirection::In,
                reference: "Initial Stock".to_string(),
                created_at: now,
            });

            snapshot.collections.medicines.push(medicine.clone());
            Ok(medicine)
        })
    }

    /// Merge-updates a medicine. Absent patch fields are left unchanged.
    pub fn update(&self, id: u64, patch: MedicineUpdate) -> StoreResult<Medicine> {
        if let Some(name) = &patch.name {
            validate_name("name", name).map_err(galen_core::CoreError::from)?;
        }
        if let Some(price) = patch.price_cents {
            validate_unit_price(price).map_err(galen_core::CoreError::from)?;
        }

        self.store.commit(|snapshot| {
            let medicine = snapshot
                .collections
                .medicines
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(|| StoreError::not_found("Medicine", id))?;

            if let Some(name) = patch.name {
                medicine.name = name.trim().to_string();
            }
            if let Some(category) = patch.category {
                medicine.category = category;
            }
            if let Some(price) = patch.price_cents {
                medicine.price_cents = price;
            }
            if let Some(quantity) = patch.quantity {
                medicine.quantity = quantity;
            }
            if let Some(expiry) = patch.expiry_date {
                medicine.expiry_date = expiry;
            }
            if let Some(supplier_id) = patch.supplier_id {
                medicine.supplier_id = supplier_id;
            }
            if let Some(batch_no) = patch.batch_no {
                medicine.batch_no = batch_no;
            }
            medicine.updated_at = Utc::now();

            debug!(id, "Medicine updated");
            Ok(medicine.clone())
        })
    }

    /// Deletes a medicine.
    ///
    /// Stock transactions and invoice lines referencing it survive; reads
    /// resolve their medicine name to "Unknown" from then on.
    pub fn delete(&self, id: u64) -> StoreResult<()> {
        self.store.commit(|snapshot| {
            let medicines = &mut snapshot.collections.medicines;
            let before = medicines.len();
            medicines.retain(|m| m.id != id);

            if medicines.len() == before {
                return Err(StoreError::not_found("Medicine", id));
            }

            debug!(id, "Medicine deleted");
            Ok(())
        })
    }

    /// Medicines with on-hand quantity below the low-stock threshold.
    pub fn low_stock(&self) -> Vec<Medicine> {
        self.store
            .read()
            .collections
            .medicines
            .iter()
            .filter(|m| m.is_low_stock())
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use galen_core::StockDirection;

    fn new_medicine(name: &str, quantity: i64) -> NewMedicine {
        NewMedicine {
            name: name.to_string(),
            category: "Tablet".to_string(),
            price_cents: Money::from_cents(500),
            quantity,
            expiry_date: "2027-01-01".parse().unwrap(),
            supplier_id: None,
            batch_no: Some("B-1".to_string()),
        }
    }

    #[test]
    fn test_create_assigns_id_and_initial_stock_transaction() {
        let store = Store::in_memory();
        let medicine = store.medicines().create(new_medicine("Aspirin", 25)).unwrap();

        assert_eq!(medicine.id, 1);
        assert_eq!(store.medicines().get(1).unwrap().quantity, 25);

        let ledger = store.stock().list();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].transaction.medicine_id, medicine.id);
        assert_eq!(ledger[0].transaction.quantity, 25);
        assert_eq!(ledger[0].transaction.direction, StockDirection::In);
        assert_eq!(ledger[0].transaction.reference, "Initial Stock");
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let store = Store::in_memory();
        assert!(store.medicines().create(new_medicine("", 10)).is_err());
        assert!(store.medicines().create(new_medicine("Ok", -1)).is_err());

        let mut negative_price = new_medicine("Ok", 10);
        negative_price.price_cents = Money::from_cents(-5);
        assert!(store.medicines().create(negative_price).is_err());
    }

    #[test]
    fn test_list_joins_supplier_name() {
        let store = Store::in_memory();
        let supplier = store
            .suppliers()
            .create(crate::repository::supplier::NewSupplier {
                name: "MedSupply Co".to_string(),
                phone: None,
                email: None,
                address: None,
            })
            .unwrap();

        let mut with_supplier = new_medicine("Ibuprofen", 30);
        with_supplier.supplier_id = Some(supplier.id);
        store.medicines().create(with_supplier).unwrap();
        store.medicines().create(new_medicine("Orphan", 5)).unwrap();

        let listed = store.medicines().list();
        assert_eq!(listed[0].supplier_name.as_deref(), Some("MedSupply Co"));
        assert_eq!(listed[1].supplier_name, None);
    }

    #[test]
    fn test_update_merges_only_supplied_fields() {
        let store = Store::in_memory();
        let medicine = store.medicines().create(new_medicine("Aspirin", 25)).unwrap();

        let updated = store
            .medicines()
            .update(
                medicine.id,
                MedicineUpdate {
                    price_cents: Some(Money::from_cents(750)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price_cents.cents(), 750);
        assert_eq!(updated.name, "Aspirin");
        assert_eq!(updated.quantity, 25);
        assert!(updated.updated_at >= medicine.updated_at);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = Store::in_memory();
        let err = store
            .medicines()
            .update(99, MedicineUpdate::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_delete_keeps_stock_history() {
        let store = Store::in_memory();
        let medicine = store.medicines().create(new_medicine("Aspirin", 25)).unwrap();

        store.medicines().delete(medicine.id).unwrap();

        assert!(store.medicines().get(medicine.id).is_err());
        let ledger = store.stock().list();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].medicine_name, "Unknown");
    }

    #[test]
    fn test_low_stock_is_strictly_below_threshold() {
        let store = Store::in_memory();
        store.medicines().create(new_medicine("Low", 9)).unwrap();
        store.medicines().create(new_medicine("Edge", 10)).unwrap();
        store.medicines().create(new_medicine("High", 50)).unwrap();

        let low = store.medicines().low_stock();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Low");
    }
}
