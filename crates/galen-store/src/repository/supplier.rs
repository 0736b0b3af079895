//! # Supplier Repository
//!
//! Plain supplier CRUD. Medicines referencing a deleted supplier keep the
//! dangling id; the medicine list resolves the name to `null`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use galen_core::validation::validate_name;
use galen_core::Supplier;

use crate::error::{StoreError, StoreResult};
use crate::snapshot::next_id;
use crate::store::Store;

/// Fields accepted when creating a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Merge-update patch: only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierUpdate {
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub address: Option<Option<String>>,
}

/// Repository for supplier operations.
#[derive(Clone)]
pub struct SupplierRepository {
    store: Store,
}

impl SupplierRepository {
    pub(crate) fn new(store: Store) -> Self {
        SupplierRepository { store }
    }

    /// Lists all suppliers.
    pub fn list(&self) -> Vec<Supplier> {
        self.store.read().collections.suppliers.clone()
    }

    /// Gets one supplier.
    pub fn get(&self, id: u64) -> StoreResult<Supplier> {
        self.store
            .read()
            .collections
            .suppliers
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Supplier", id))
    }

    /// Creates a supplier.
    pub fn create(&self, new: NewSupplier) -> StoreResult<Supplier> {
        let name = validate_name("name", &new.name).map_err(galen_core::CoreError::from)?;

        self.store.commit(|snapshot| {
            let supplier = Supplier {
                id: next_id(&mut snapshot.counters.suppliers),
                name,
                phone: new.phone,
                email: new.email,
                address: new.address,
                created_at: Utc::now(),
            };

            debug!(id = supplier.id, "Creating supplier");
            snapshot.collections.suppliers.push(supplier.clone());
            Ok(supplier)
        })
    }

    /// Merge-updates a supplier.
    pub fn update(&self, id: u64, patch: SupplierUpdate) -> StoreResult<Supplier> {
        if let Some(name) = &patch.name {
            validate_name("name", name).map_err(galen_core::CoreError::from)?;
        }

        self.store.commit(|snapshot| {
            let supplier = snapshot
                .collections
                .suppliers
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| StoreError::not_found("Supplier", id))?;

            if let Some(name) = patch.name {
                supplier.name = name.trim().to_string();
            }
            if let Some(phone) = patch.phone {
                supplier.phone = phone;
            }
            if let Some(email) = patch.email {
                supplier.email = email;
            }
            if let Some(address) = patch.address {
                supplier.address = address;
            }

            debug!(id, "Supplier updated");
            Ok(supplier.clone())
        })
    }

    /// Deletes a supplier. Medicines referencing it are left untouched.
    pub fn delete(&self, id: u64) -> StoreResult<()> {
        self.store.commit(|snapshot| {
            let suppliers = &mut snapshot.collections.suppliers;
            let before = suppliers.len();
            suppliers.retain(|s| s.id != id);

            if suppliers.len() == before {
                return Err(StoreError::not_found("Supplier", id));
            }

            debug!(id, "Supplier deleted");
            Ok(())
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_list_update_delete() {
        let store = Store::in_memory();

        let supplier = store
            .suppliers()
            .create(NewSupplier {
                name: "MedSupply Co".to_string(),
                phone: Some("555-0199".to_string()),
                email: None,
                address: None,
            })
            .unwrap();
        assert_eq!(supplier.id, 1);
        assert_eq!(store.suppliers().list().len(), 1);

        let updated = store
            .suppliers()
            .update(
                supplier.id,
                SupplierUpdate {
                    phone: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.phone, None);
        assert_eq!(updated.name, "MedSupply Co");

        store.suppliers().delete(supplier.id).unwrap();
        assert!(store.suppliers().list().is_empty());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let store = Store::in_memory();
        assert!(matches!(
            store.suppliers().delete(3).unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }
}
