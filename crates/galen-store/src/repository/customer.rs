//! # Customer Repository
//!
//! Customer CRUD and per-customer sale history.
//!
//! Deleting a customer does NOT cascade: their sales stay in the ledger
//! with a dangling `customer_id` that read-side joins resolve to `null`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use galen_core::validation::validate_name;
use galen_core::{Customer, Sale};

use crate::error::{StoreError, StoreResult};
use crate::repository::UNKNOWN_NAME;
use crate::snapshot::next_id;
use crate::store::Store;

/// Fields accepted when creating a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Merge-update patch: only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<Option<String>>,
    pub address: Option<Option<String>>,
}

/// One entry of a customer's purchase history: the sale plus the names of
/// the medicines on its invoice.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerSaleHistory {
    #[serde(flatten)]
    pub sale: Sale,
    /// Medicine names on the invoice; "Unknown" for deleted medicines.
    pub medicines: Vec<String>,
}

/// Repository for customer operations.
#[derive(Clone)]
pub struct CustomerRepository {
    store: Store,
}

impl CustomerRepository {
    pub(crate) fn new(store: Store) -> Self {
        CustomerRepository { store }
    }

    /// Lists all customers.
    pub fn list(&self) -> Vec<Customer> {
        self.store.read().collections.customers.clone()
    }

    /// Gets a customer by id.
    pub fn get(&self, id: u64) -> StoreResult<Customer> {
        self.store
            .read()
            .collections
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Customer", id))
    }

    /// Creates a customer.
    pub fn create(&self, new: NewCustomer) -> StoreResult<Customer> {
        let name = validate_name("name", &new.name).map_err(galen_core::CoreError::from)?;

        self.store.commit(|snapshot| {
            let customer = Customer {
                id: next_id(&mut snapshot.counters.customers),
                name,
                phone: new.phone,
                email: new.email,
                address: new.address,
                created_at: Utc::now(),
            };

            debug!(id = customer.id, "Creating customer");
            snapshot.collections.customers.push(customer.clone());
            Ok(customer)
        })
    }

    /// Merge-updates a customer.
    pub fn update(&self, id: u64, patch: CustomerUpdate) -> StoreResult<Customer> {
        if let Some(name) = &patch.name {
            validate_name("name", name).map_err(galen_core::CoreError::from)?;
        }

        self.store.commit(|snapshot| {
            let customer = snapshot
                .collections
                .customers
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| StoreError::not_found("Customer", id))?;

            if let Some(name) = patch.name {
                customer.name = name.trim().to_string();
            }
            if let Some(phone) = patch.phone {
                customer.phone = phone;
            }
            if let Some(email) = patch.email {
                customer.email = email;
            }
            if let Some(address) = patch.address {
                customer.address = address;
            }

            debug!(id, "Customer updated");
            Ok(customer.clone())
        })
    }

    /// Deletes a customer. Past sales referencing them are left in place.
    pub fn delete(&self, id: u64) -> StoreResult<()> {
        self.store.commit(|snapshot| {
            let customers = &mut snapshot.collections.customers;
            let before = customers.len();
            customers.retain(|c| c.id != id);

            if customers.len() == before {
                return Err(StoreError::not_found("Customer", id));
            }

            debug!(id, "Customer deleted");
            Ok(())
        })
    }

    /// The customer's sales, each with the medicine names sold.
    ///
    /// Works for deleted customers too, which is exactly how dangling sale
    /// references stay reachable.
    pub fn history(&self, customer_id: u64) -> Vec<CustomerSaleHistory> {
        let snapshot = self.store.read();

        snapshot
            .collections
            .sales
            .iter()
            .filter(|sale| sale.customer_id == Some(customer_id))
            .map(|sale| {
                let medicines = snapshot
                    .collections
                    .invoices
                    .iter()
                    .filter(|line| line.sale_id == sale.id)
                    .map(|line| {
                        snapshot
                            .collections
                            .medicines
                            .iter()
                            .find(|m| m.id == line.medicine_id)
                            .map_or_else(|| UNKNOWN_NAME.to_string(), |m| m.name.clone())
                    })
                    .collect();
                CustomerSaleHistory {
                    sale: sale.clone(),
                    medicines,
                }
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(name: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            phone: "555-0101".to_string(),
            email: None,
            address: None,
        }
    }

    #[test]
    fn test_create_and_get() {
        let store = Store::in_memory();
        let customer = store.customers().create(new_customer("Ada")).unwrap();

        assert_eq!(customer.id, 1);
        assert_eq!(store.customers().get(1).unwrap().name, "Ada");
    }

    #[test]
    fn test_update_merges_fields() {
        let store = Store::in_memory();
        let customer = store.customers().create(new_customer("Ada")).unwrap();

        let updated = store
            .customers()
            .update(
                customer.id,
                CustomerUpdate {
                    email: Some(Some("ada@example.com".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Ada");
        assert_eq!(updated.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let store = Store::in_memory();
        assert!(matches!(
            store.customers().delete(42).unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[test]
    fn test_history_of_unknown_customer_is_empty() {
        let store = Store::in_memory();
        assert!(store.customers().history(7).is_empty());
    }
}
