//! The uniform response wrapper returned to REST clients.
//!
//! Whatever backend produced the data, a successful response looks like:
//!
//! ```text
//! {
//!   "task": { "id": 1, ... },        // or "tasks": [...], "user", "users"
//!   "message": "Task created successfully!",
//!   "_links": { "self": {...}, "create": {...}, ... }
//! }
//! ```

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::links::{collection_links, item_links, Links, ResourceKind};
use crate::types::{Task, User};

/// A record that can be wrapped in an [`Envelope`].
pub trait Resource: Serialize {
    /// Which collection the record belongs to.
    const KIND: ResourceKind;

    /// The id used in the record's item URL.
    fn link_id(&self) -> String;
}

impl Resource for Task {
    const KIND: ResourceKind = ResourceKind::Tasks;

    fn link_id(&self) -> String {
        self.id.to_string()
    }
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::Users;

    fn link_id(&self) -> String {
        self.user_id.to_string()
    }
}

/// A collection member carrying its own links.
#[derive(Debug, Clone, Serialize)]
pub struct Linked<T> {
    /// The record itself, flattened into the member object.
    #[serde(flatten)]
    pub resource: T,
    /// Links for this member.
    #[serde(rename = "_links")]
    pub links: Links,
}

/// Resource + message + links.
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    key: &'static str,
    resource: T,
    message: String,
    links: Links,
}

impl<T: Resource> Envelope<T> {
    /// Wrap a single record with its item links.
    #[must_use]
    pub fn item(resource: T, message: impl Into<String>, base_url: &str) -> Self {
        let links = item_links(T::KIND, resource.link_id(), base_url);
        Self {
            key: T::KIND.singular(),
            resource,
            message: message.into(),
            links,
        }
    }
}

impl<T: Resource> Envelope<Vec<Linked<T>>> {
    /// Wrap a sequence of records; each member and the collection get links.
    #[must_use]
    pub fn collection(resources: Vec<T>, message: impl Into<String>, base_url: &str) -> Self {
        let members = resources
            .into_iter()
            .map(|resource| {
                let links = item_links(T::KIND, resource.link_id(), base_url);
                Linked { resource, links }
            })
            .collect();

        Self {
            key: T::KIND.plural(),
            resource: members,
            message: message.into(),
            links: collection_links(T::KIND, base_url),
        }
    }
}

impl<T> Envelope<T> {
    /// The envelope-level links.
    pub fn links(&self) -> &Links {
        &self.links
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(self.key, &self.resource)?;
        map.serialize_entry("message", &self.message)?;
        map.serialize_entry("_links", &self.links)?;
        map.end()
    }
}
