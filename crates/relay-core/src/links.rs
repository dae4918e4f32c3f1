//! Hypermedia link generation.
//!
//! Links are a pure function of resource kind, optional id and base URL.
//! Identical inputs always yield identical output in the same order.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The resource collections the gateway exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `/tasks`, backed by the task RPC service.
    Tasks,
    /// `/users`, backed by the user SOAP service.
    Users,
}

impl ResourceKind {
    /// Collection path segment, also the envelope key for sequences.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Users => "users",
        }
    }

    /// Envelope key for a single resource.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Tasks => "task",
            Self::Users => "user",
        }
    }
}

/// HTTP method a link expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

/// A single named, method-tagged link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    /// Relation name, e.g. `self` or `update`.
    pub relation: String,
    /// Absolute URL.
    pub href: String,
    /// Method to use against `href`.
    pub method: LinkMethod,
}

/// An ordered set of links keyed by relation.
///
/// Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<ResourceLink>);

impl Links {
    fn push(&mut self, relation: &str, href: &str, method: LinkMethod) {
        self.0.push(ResourceLink {
            relation: relation.to_string(),
            href: href.to_string(),
            method,
        });
    }

    /// Look up a link by relation.
    #[must_use]
    pub fn get(&self, relation: &str) -> Option<&ResourceLink> {
        self.0.iter().find(|link| link.relation == relation)
    }

    /// Relation names in order.
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|link| link.relation.as_str())
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for link in &self.0 {
            map.serialize_entry(&link.relation, link)?;
        }
        map.end()
    }
}

/// Build the links for a collection (`id = None`) or a single item.
///
/// Tasks get `self`, `create` and, for items, `get_by_id`, `update`, `delete`.
/// Users get `self`, `create` and, for items, `get_by_id`.
#[must_use]
pub fn build_links(kind: ResourceKind, id: Option<&str>, base_url: &str) -> Links {
    let base = base_url.trim_end_matches('/');
    let collection = format!("{base}/{}", kind.plural());
    let item = id.map(|id| format!("{collection}/{id}"));

    let mut links = Links::default();
    links.push("self", item.as_deref().unwrap_or(&collection), LinkMethod::Get);
    links.push("create", &collection, LinkMethod::Post);

    if let Some(item) = item.as_deref() {
        links.push("get_by_id", item, LinkMethod::Get);
        if kind == ResourceKind::Tasks {
            links.push("update", item, LinkMethod::Put);
            links.push("delete", item, LinkMethod::Delete);
        }
    }

    links
}

/// Links for a collection.
#[must_use]
pub fn collection_links(kind: ResourceKind, base_url: &str) -> Links {
    build_links(kind, None, base_url)
}

/// Links for a single item.
#[must_use]
pub fn item_links(kind: ResourceKind, id: impl fmt::Display, base_url: &str) -> Links {
    build_links(kind, Some(&id.to_string()), base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://gw.local";

    #[test]
    fn task_collection_links() {
        let links = collection_links(ResourceKind::Tasks, BASE);
        assert_eq!(links.relations().collect::<Vec<_>>(), ["self", "create"]);
        assert_eq!(links.get("self").unwrap().href, "http://gw.local/tasks");
        assert_eq!(links.get("create").unwrap().method, LinkMethod::Post);
    }

    #[test]
    fn task_item_links() {
        let links = item_links(ResourceKind::Tasks, 7, BASE);
        assert_eq!(
            links.relations().collect::<Vec<_>>(),
            ["self", "create", "get_by_id", "update", "delete"]
        );
        assert_eq!(links.get("self").unwrap().href, "http://gw.local/tasks/7");
        assert_eq!(links.get("update").unwrap().method, LinkMethod::Put);
        assert_eq!(links.get("delete").unwrap().method, LinkMethod::Delete);
        assert_eq!(links.get("create").unwrap().href, "http://gw.local/tasks");
    }

    #[test]
    fn user_item_links_have_no_mutations() {
        let links = item_links(ResourceKind::Users, 3, BASE);
        assert_eq!(
            links.relations().collect::<Vec<_>>(),
            ["self", "create", "get_by_id"]
        );
        assert!(links.get("update").is_none());
        assert!(links.get("delete").is_none());
    }

    #[test]
    fn trailing_slash_ignored() {
        let a = collection_links(ResourceKind::Users, "http://gw.local/");
        let b = collection_links(ResourceKind::Users, "http://gw.local");
        assert_eq!(a, b);
    }

    #[test]
    fn deterministic() {
        let first = item_links(ResourceKind::Tasks, 1, BASE);
        let _ = item_links(ResourceKind::Users, 2, BASE);
        assert_eq!(first, item_links(ResourceKind::Tasks, 1, BASE));
    }

    #[test]
    fn serializes_as_ordered_object() {
        let links = item_links(ResourceKind::Users, 4, BASE);
        let json = serde_json::to_string(&links).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"self":{"relation":"self","href":"http://gw.local/users/4","method":"GET"},"#,
                r#""create":{"relation":"create","href":"http://gw.local/users","method":"POST"},"#,
                r#""get_by_id":{"relation":"get_by_id","href":"http://gw.local/users/4","method":"GET"}}"#
            )
        );
    }
}
