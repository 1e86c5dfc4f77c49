use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A value authored either as one item or as a list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    // `Many` goes first: a struct would otherwise accept `[]` as a sequence.
    Many(Vec<T>),
    Single(T),
}

impl<T> OneOrMany<T> {
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::Single(item) => vec![item],
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(item: T) -> Self {
        Self::Single(item)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

/// Description of one accepted argument or of a returned value.
///
/// Keys the binding engine does not interpret (`http`, `default`, ...) are kept in `extra`
/// and handed to the host unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    /// The host's type expression: a name (`"string"`), a list (`["object"]`) or an inline object.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub root: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParamSchema {
    /// A named argument of the given type.
    pub fn arg(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            arg: Some(name.into()),
            kind: Some(Value::String(kind.into())),
            root: false,
            required: false,
            description: None,
            extra: Map::new(),
        }
    }

    /// The result used when an endpoint does not describe what it returns.
    #[must_use]
    pub fn root_object() -> Self {
        Self {
            arg: None,
            kind: Some(Value::from("object")),
            root: true,
            required: false,
            description: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn root(mut self) -> Self {
        self.root = true;
        self
    }

    /// Attaches a host-specific key (e.g. `http: {source: "body"}`).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(flag: &bool) -> bool {
    !*flag
}
