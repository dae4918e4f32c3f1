//! In-memory `UserStore` implementation.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use relay_core::{User, UserId};

use crate::error::{Result, StoreError};
use crate::UserStore;

/// Counter and records, guarded together.
#[derive(Debug)]
struct Inner {
    next_id: UserId,
    // Keyed by monotonically issued ids, so iteration order is creation order.
    records: BTreeMap<UserId, User>,
}

/// A concurrency-safe in-memory user registry.
///
/// Every operation runs under a single mutex covering both the id counter
/// and the record map.
#[derive(Debug)]
pub struct UserRecordStore {
    inner: Mutex<Inner>,
}

impl UserRecordStore {
    /// Create an empty store whose first issued id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: UserId::FIRST,
                records: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }
}

impl Default for UserRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for UserRecordStore {
    fn create(&self, name: &str, email: &str) -> User {
        let mut inner = self.inner.lock();
        let user_id = inner.next_id;
        inner.next_id = user_id.next();

        let user = User::new(user_id, name, email);
        inner.records.insert(user_id, user.clone());

        tracing::info!(user_id = %user_id, name = %name, email = %email, "User created");
        user
    }

    fn list(&self) -> Vec<User> {
        let inner = self.inner.lock();
        let users: Vec<User> = inner.records.values().cloned().collect();
        tracing::debug!(count = users.len(), "Listing users");
        users
    }

    fn get(&self, user_id: UserId) -> Result<User> {
        let inner = self.inner.lock();
        inner.records.get(&user_id).cloned().ok_or_else(|| {
            tracing::warn!(user_id = %user_id, "User not found");
            StoreError::NotFound(user_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn ids_start_at_one_and_increment() {
        let store = UserRecordStore::new();
        let a = store.create("A", "a@b.com");
        let b = store.create("B", "b@b.com");
        assert_eq!(a.user_id, UserId::new(1));
        assert_eq!(b.user_id, UserId::new(2));
    }

    #[test]
    fn list_in_creation_order() {
        let store = UserRecordStore::new();
        assert!(store.list().is_empty());
        store.create("first", "1@x");
        store.create("second", "2@x");
        let names: Vec<_> = store.list().into_iter().map(|u| u.name).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = UserRecordStore::new();
        store.create("A", "a@b.com");
        assert_eq!(
            store.get(UserId::new(99)),
            Err(StoreError::NotFound(UserId::new(99)))
        );
        assert_eq!(
            StoreError::NotFound(UserId::new(99)).to_string(),
            "User with ID 99 not found."
        );
    }

    #[test]
    fn get_returns_stored_record() {
        let store = UserRecordStore::new();
        let created = store.create("O'Brien & Co", "ob@co.ie");
        assert_eq!(store.get(created.user_id).unwrap(), created);
    }

    #[test]
    fn concurrent_creates_issue_unique_ids() {
        let store = Arc::new(UserRecordStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..50)
                        .map(|i| store.create(&format!("u{t}-{i}"), "x@y").user_id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: Vec<UserId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let unique: HashSet<_> = ids.iter().copied().collect();

        assert_eq!(ids.len(), 400);
        assert_eq!(unique.len(), 400);
        assert_eq!(store.len(), 400);
        assert_eq!(ids.iter().max(), Some(&UserId::new(400)));
        for id in ids {
            assert!(store.get(id).is_ok());
        }
    }
}
