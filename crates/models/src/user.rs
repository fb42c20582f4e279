use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_NAME: &str = "User";
pub const DEFAULT_ROLE: &str = "user";

/// A single user entry as persisted and served.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub role: String,
}

impl UserRecord {
    pub fn new(id: u64, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self { id, name: name.into(), role: role.into() }
    }
}

/// Ordered list of records; new records go at the end.
pub type Collection = Vec<UserRecord>;

/// Persisted document shape: `{ "users": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub users: Collection,
}

impl UserEnvelope {
    pub fn new(users: Collection) -> Self { Self { users } }
}

/// Request body for creating a user. Both fields may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: Option<String>,
    pub role: Option<String>,
}

impl NewUser {
    /// Pick `name` and `role` out of a decoded body one field at a time, so a
    /// field of the wrong type only loses itself. A non-object body is `{}`.
    pub fn from_json_value(body: &Value) -> Self {
        let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        Self { name: field("name"), role: field("role") }
    }
}

/// The two records served when the source is missing or unusable.
pub fn seed() -> Collection {
    vec![
        UserRecord::new(1, "Admin", "admin"),
        UserRecord::new(2, DEFAULT_NAME, DEFAULT_ROLE),
    ]
}

/// Empty or absent names fall back to `"User"`.
pub fn name_or_default(input: Option<&str>) -> String {
    match input {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => DEFAULT_NAME.to_string(),
    }
}

/// Empty, blank or absent roles fall back to `"user"`.
pub fn role_or_default(input: Option<&str>) -> String {
    match input {
        Some(r) if !r.trim().is_empty() => r.to_string(),
        _ => DEFAULT_ROLE.to_string(),
    }
}
