use crate::constants::DEFAULT_PRINCIPAL_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An access-control rule as authored next to an endpoint.
///
/// `property` and `principalType` may be left out; every other key (`permission`,
/// `principalId`, `accessType`, ...) is passed to the host untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AclRule {
    /// `ALLOW` for the given principal id.
    pub fn allow(principal_id: impl Into<String>) -> Self {
        let principal_id: String = principal_id.into();
        Self::default().with("principalId", principal_id).with("permission", "ALLOW")
    }

    /// `DENY` for the given principal id.
    pub fn deny(principal_id: impl Into<String>) -> Self {
        let principal_id: String = principal_id.into();
        Self::default().with("principalId", principal_id).with("permission", "DENY")
    }

    #[must_use]
    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    #[must_use]
    pub fn principal_type(mut self, principal_type: impl Into<String>) -> Self {
        self.principal_type = Some(principal_type.into());
        self
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Fills the missing `property` and `principalType`.
    ///
    /// Empty strings count as missing; explicit values are never replaced.
    #[must_use]
    pub fn resolve(self, operation: &str) -> AclEntry {
        AclEntry {
            property: non_empty(self.property).unwrap_or_else(|| operation.to_owned()),
            principal_type: non_empty(self.principal_type)
                .unwrap_or_else(|| DEFAULT_PRINCIPAL_TYPE.to_owned()),
            extra: self.extra,
        }
    }
}

/// A fully defaulted access-control entry as stored in the model's ACL settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclEntry {
    pub property: String,
    pub principal_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AclEntry {
    /// The `permission` field, when present.
    #[must_use]
    pub fn permission(&self) -> Option<&str> {
        self.extra.get("permission").and_then(Value::as_str)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
