use crate::acl::AclEntry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The part of a model definition the binding engine reads.
///
/// `relations` and `scopes` are keyed by identifier; their bodies belong to the host and are
/// never inspected here. `None` and an empty map are equivalent for discovery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acls: Option<Vec<AclEntry>>,
}

impl ModelSettings {
    /// Declares a relation with the given body.
    #[must_use]
    pub fn relation(mut self, name: impl Into<String>, body: Value) -> Self {
        self.relations.get_or_insert_with(Map::new).insert(name.into(), body);
        self
    }

    /// Declares a scope with the given body.
    #[must_use]
    pub fn scope(mut self, name: impl Into<String>, body: Value) -> Self {
        self.scopes.get_or_insert_with(Map::new).insert(name.into(), body);
        self
    }

    pub fn relation_names(&self) -> impl Iterator<Item = &str> {
        self.relations.iter().flat_map(Map::keys).map(String::as_str)
    }

    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().flat_map(Map::keys).map(String::as_str)
    }
}
