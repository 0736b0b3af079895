//! # User Repository
//!
//! Account storage. Password hashing happens above the store; the
//! repository only ever sees the finished hash string.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use galen_core::validation::validate_username;
use galen_core::{Role, User};

use crate::error::{StoreError, StoreResult};
use crate::snapshot::next_id;
use crate::store::Store;

/// A new account with an already-computed password hash.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Repository for user accounts.
#[derive(Clone)]
pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    pub(crate) fn new(store: Store) -> Self {
        UserRepository { store }
    }

    /// Looks an account up by exact username.
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.store
            .read()
            .collections
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    /// Creates an account. Usernames are unique.
    pub fn create(&self, new: NewUser) -> StoreResult<User> {
        let username = validate_username(&new.username).map_err(galen_core::CoreError::from)?;

        self.store.commit(|snapshot| {
            if snapshot
                .collections
                .users
                .iter()
                .any(|u| u.username == username)
            {
                return Err(StoreError::duplicate("username", &username));
            }

            let user = User {
                id: next_id(&mut snapshot.counters.users),
                username: username.clone(),
                password_hash: new.password_hash.clone(),
                role: new.role.unwrap_or_default(),
                email: new.email.clone(),
                created_at: Utc::now(),
            };
            snapshot.collections.users.push(user.clone());

            info!(id = user.id, username = %user.username, role = ?user.role, "User created");
            Ok(user)
        })
    }

    /// Number of registered accounts.
    pub fn count(&self) -> usize {
        self.store.read().collections.users.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: None,
            email: None,
        }
    }

    #[test]
    fn test_create_and_find() {
        let store = Store::in_memory();

        let created = store.users().create(new_user("amina")).unwrap();
        assert_eq!(created.role, Role::Staff); // default

        let found = store.users().find_by_username("amina").unwrap();
        assert_eq!(found.id, created.id);
        assert!(store.users().find_by_username("nobody").is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = Store::in_memory();
        store.users().create(new_user("amina")).unwrap();

        let err = store.users().create(new_user("amina")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "username", .. }));
        assert_eq!(store.users().count(), 1);
    }

    #[test]
    fn test_explicit_role_kept() {
        let store = Store::in_memory();
        let mut new = new_user("boss");
        new.role = Some(Role::Admin);

        let user = store.users().create(new).unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_invalid_username_rejected() {
        let store = Store::in_memory();
        assert!(store.users().create(new_user("has spaces")).is_err());
        assert!(store.users().create(new_user("")).is_err());
        assert_eq!(store.users().count(), 0);
    }
}
