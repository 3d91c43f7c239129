use serde::{Deserialize, Serialize};

/// A stored coffee record.
///
/// The identifier is fixed once the record is stored; only `name` changes
/// on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coffee {
    /// Unique, non-empty identifier
    pub id: String,
    /// Display name, e.g. "Cafe Cereza"
    pub name: String,
}

impl Coffee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Request body for creating or replacing a coffee.
///
/// `id` is optional: absent, `null` and `""` all mean "assign one for me".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoffeeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl CoffeeRequest {
    /// A request without an identifier.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// A request carrying a caller-chosen identifier.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
        }
    }

    /// The caller-supplied identifier, if it is usable.
    pub fn supplied_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Build the record to store, using the supplied identifier or the
    /// result of `generate` when there is none.
    pub fn into_coffee_or_else(self, generate: impl FnOnce() -> String) -> Coffee {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => generate(),
        };
        Coffee { id, name: self.name }
    }

    /// Build the record to store under `id`, ignoring any body identifier.
    pub fn into_coffee_with_id(self, id: impl Into<String>) -> Coffee {
        Coffee {
            id: id.into(),
            name: self.name,
        }
    }
}
