//! Core types for the relay gateway.
//!
//! This crate provides the foundational types shared by the gateway, the
//! backend adapters and the user service:
//!
//! - **Identifiers**: `TaskId` and `UserId`
//! - **Records**: `Task` and `User`
//! - **Faults**: the normalized failure type every adapter returns
//! - **Links**: deterministic hypermedia link generation
//! - **Envelope**: the uniform resource + message + links response
//!
//! # Example
//!
//! ```
//! use relay_core::{item_links, ResourceKind, TaskId};
//!
//! let links = item_links(ResourceKind::Tasks, TaskId::new(7), "http://localhost:8000");
//! assert_eq!(links.get("update").unwrap().href, "http://localhost:8000/tasks/7");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod envelope;
pub mod error;
pub mod ids;
pub mod links;
pub mod types;

pub use envelope::{Envelope, Linked, Resource};
pub use error::{Fault, FaultCategory, Result};
pub use ids::{IdError, TaskId, UserId};
pub use links::{
    build_links, collection_links, item_links, LinkMethod, Links, ResourceKind, ResourceLink,
};
pub use types::{Task, User};
