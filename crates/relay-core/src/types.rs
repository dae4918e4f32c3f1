//! Domain records exchanged with the backends and returned to REST clients.

use serde::{Deserialize, Serialize};

use crate::ids::{TaskId, UserId};

/// A task as held by the task backend.
///
/// `status` is opaque to the gateway; whatever the backend sets is passed
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Backend-assigned identifier.
    pub id: TaskId,
    /// Short title.
    #[serde(default)]
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Backend-defined status string.
    #[serde(default)]
    pub status: String,
    /// Who created the task.
    #[serde(default)]
    pub created_by: String,
}

/// A user as held by the user record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
}

impl User {
    /// Create a new user record.
    #[must_use]
    pub fn new(user_id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_fields_default_when_missing() {
        let task: Task = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(task.id, TaskId::new(3));
        assert!(task.title.is_empty());
        assert!(task.status.is_empty());
    }

    #[test]
    fn user_json_shape() {
        let user = User::new(UserId::new(1), "Ada", "ada@example.com");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"user_id": 1, "name": "Ada", "email": "ada@example.com"})
        );
    }
}
