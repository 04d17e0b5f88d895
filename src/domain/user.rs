//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Display name
    #[schema(example = "Ann")]
    pub name: String,
    /// Lowercased, unique email address
    #[schema(example = "ann@example.com")]
    pub email: String,
    /// Store-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Validated, normalized data for a new row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Sparse update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserChanges {
    /// True when no column would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// Raw create/update body.
///
/// Fields stay untyped JSON so a non-string value is reported by validation
/// instead of being rejected by the deserializer.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserInput {
    /// Display name
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Ann")]
    pub name: Option<Value>,
    /// Email address
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "ann@example.com")]
    pub email: Option<Value>,
}

impl UserInput {
    /// Build an input from plain strings.
    pub fn new(name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            name: name.map(Value::from),
            email: email.map(Value::from),
        }
    }

    /// Name as a string, `None` when absent or not a string.
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }

    /// Email as a string, `None` when absent or not a string.
    pub fn email_str(&self) -> Option<&str> {
        self.email.as_ref().and_then(Value::as_str)
    }

    /// Whether the caller supplied a name for an update.
    pub fn has_name(&self) -> bool {
        is_supplied(self.name.as_ref())
    }

    /// Whether the caller supplied an email for an update.
    pub fn has_email(&self) -> bool {
        is_supplied(self.email.as_ref())
    }
}

// null and "" mean "leave unchanged"
fn is_supplied(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Parse a path segment as a user id.
pub fn parse_user_id(raw: &str) -> AppResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| AppError::invalid_id())
}
