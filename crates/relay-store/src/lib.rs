//! User record storage for the relay user service.
//!
//! This crate provides the [`UserStore`] trait and its in-memory
//! implementation, [`UserRecordStore`]. Ids are issued monotonically starting
//! at 1 and are never reused.
//!
//! # Example
//!
//! ```
//! use relay_store::{UserRecordStore, UserStore};
//!
//! let store = UserRecordStore::new();
//! let ada = store.create("Ada", "ada@example.com");
//! assert_eq!(ada.user_id.get(), 1);
//! assert_eq!(store.get(ada.user_id).unwrap().name, "Ada");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;

pub use error::{Result, StoreError};
pub use memory::UserRecordStore;

use relay_core::{User, UserId};

/// The storage trait for user records.
///
/// This trait abstracts the storage layer so the user service can be wired
/// to a different backing store in tests or later deployments.
pub trait UserStore: Send + Sync {
    /// Issue the next id and store a new record under it.
    ///
    /// Id issuance and insertion are observed together: no caller can see
    /// the id without its record.
    fn create(&self, name: &str, email: &str) -> User;

    /// All records in creation order.
    fn list(&self) -> Vec<User>;

    /// Get a record by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no record has this id.
    fn get(&self, user_id: UserId) -> Result<User>;
}
